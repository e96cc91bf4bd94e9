use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use repl::Repl;

mod render;
mod repl;

/// Tokenize and parse `SELECT <cols> FROM <table> [WHERE <col> <op> <value>]` queries.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Query to evaluate once. Starts a REPL if neither this nor --file is given.
    query: Option<String>,

    /// Read the query from a file instead.
    #[arg(short, long, conflicts_with = "query")]
    file: Option<PathBuf>,

    /// Print the token table alongside the statement.
    #[arg(long)]
    tokens: bool,

    /// Raise the log level (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let repl = Repl::new(args.tokens);

    let result = match (&args.query, &args.file) {
        (Some(query), _) => repl.eval_command(query),
        (None, Some(file)) => repl.eval_file(file)?,
        (None, None) => {
            println!("selectql");
            repl.run()?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    let output = Repl::format_result(&result);

    if result.is_ok() {
        println!("{output}");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{output}");
        Ok(ExitCode::FAILURE)
    }
}
