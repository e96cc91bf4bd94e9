use std::{
    io::{stdin, stdout, Write},
    path::Path,
};

use anyhow::Context;
use common::ParseError;
use lexer::token::Token;
use parser::ast::SelectStatement;

use crate::render::{render_error, render_statement, render_tokens};

pub struct Repl {
    show_tokens: bool,
}

#[derive(Debug)]
pub enum Outcome {
    Exit,
    Help,
    Tokens(CommandResult),
    NoInput,
    UnrecognisedInput,
    Ok(CommandResult),
}

#[derive(Debug)]
pub enum CommandResult {
    ParseError { source: String, error: ParseError },
    Tokens(Vec<Token>),
    Ok {
        statement: SelectStatement,
        tokens: Option<Vec<Token>>,
    },
}

impl CommandResult {
    pub fn is_ok(&self) -> bool {
        !matches!(self, CommandResult::ParseError { .. })
    }
}

const HELP: &str = "\
Enter a query of the form SELECT <cols> FROM <table> [WHERE <col> <op> <value>].
Meta commands:
  .tokens <query>   show the tokens of a query
  .help             show this message
  .exit             leave";

impl Repl {
    pub fn new(show_tokens: bool) -> Self {
        Repl { show_tokens }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        loop {
            Repl::print_prompt()?;

            let mut buf = String::new();
            let read = stdin().read_line(&mut buf).context("Failed to read from stdin.")?;

            // EOF
            if read == 0 {
                println!();
                return Ok(());
            }

            match self.handle_repl_command(&buf) {
                Outcome::Ok(result) | Outcome::Tokens(result) => {
                    println!("{}", Repl::format_result(&result));
                }
                Outcome::Help => println!("{HELP}"),
                Outcome::UnrecognisedInput => println!("Error! Command not recognised."),
                Outcome::Exit => {
                    println!("Goodbye.");
                    return Ok(());
                }
                Outcome::NoInput => continue,
            }
        }
    }

    /// Tokenize and parse one query. Failures are values, never errors.
    pub fn eval_command(&self, input: &str) -> CommandResult {
        log::debug!("Evaluating: {input}");

        let tokens = match lexer::tokenize(input) {
            Ok(tokens) => tokens,
            Err(error) => {
                return CommandResult::ParseError {
                    source: input.to_string(),
                    error,
                }
            }
        };

        match parser::parse_select(&tokens) {
            Ok(statement) => CommandResult::Ok {
                statement,
                tokens: self.show_tokens.then_some(tokens),
            },
            Err(error) => CommandResult::ParseError {
                source: input.to_string(),
                error,
            },
        }
    }

    pub fn eval_file(&self, file: &Path) -> anyhow::Result<CommandResult> {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to open file {}.", file.display()))?;

        Ok(self.eval_command(content.trim_end()))
    }

    pub fn eval_tokens(input: &str) -> CommandResult {
        match lexer::tokenize(input) {
            Ok(tokens) => CommandResult::Tokens(tokens),
            Err(error) => CommandResult::ParseError {
                source: input.to_string(),
                error,
            },
        }
    }

    pub fn format_result(result: &CommandResult) -> String {
        match result {
            CommandResult::ParseError { source, error } => render_error(source, error),
            CommandResult::Tokens(tokens) => render_tokens(tokens),
            CommandResult::Ok { statement, tokens } => match tokens {
                Some(tokens) => format!(
                    "{}\n{}\n{statement}",
                    render_tokens(tokens),
                    render_statement(statement)
                ),
                None => format!("{}\n{statement}", render_statement(statement)),
            },
        }
    }

    /// Handle user input via REPL. This will either eval a
    /// query or short-circuit for a meta command.
    fn handle_repl_command(&self, buf: &str) -> Outcome {
        let fmt_buf = buf.trim();

        if fmt_buf.is_empty() {
            return Outcome::NoInput;
        }

        if Repl::is_meta_command(fmt_buf) {
            Repl::handle_meta_command(fmt_buf)
        } else {
            Outcome::Ok(self.eval_command(fmt_buf))
        }
    }

    fn is_meta_command(buf: &str) -> bool {
        buf.starts_with('.') || buf == "?"
    }

    fn handle_meta_command(buf: &str) -> Outcome {
        let (command, rest) = buf.split_once(' ').unwrap_or((buf, ""));

        match command.to_lowercase().as_ref() {
            ".exit" | ".quit" | ".close" => Outcome::Exit,
            ".help" | ".h" | "?" | ".?" => Outcome::Help,
            ".tokens" => Outcome::Tokens(Repl::eval_tokens(rest.trim())),
            _ => Outcome::UnrecognisedInput,
        }
    }

    fn print_prompt() -> anyhow::Result<()> {
        print!("> ");
        stdout().flush()?;
        Ok(())
    }
}
