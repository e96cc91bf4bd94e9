use common::{ParseError, TextSpan};
use lexer::token::Token;
use parser::ast::SelectStatement;
use tabled::{builder::Builder, Table, Tabled};

/// 1-based line and column of a character offset.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Translate a character offset into a line/column pair. Offsets past the
/// end of `source` land just after its last character.
pub fn locate(source: &str, offset: usize) -> Location {
    let mut line = 1;
    let mut column = 1;

    for ch in source.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    Location { line, column }
}

/// Render an error against the text it came from, underlining the span.
///
/// ```text
/// error: Unexpected token. (pos 10, len 1) Expected From, found Comma.
///  --> line 1, column 11
///   |
/// 1 | SELECT id,, name FROM users
///   |           ^
/// ```
pub fn render_error(source: &str, err: &ParseError) -> String {
    let location = locate(source, err.span.start);
    let line_text = source.lines().nth(location.line - 1).unwrap_or("");
    let gutter = " ".repeat(location.line.to_string().len());

    format!(
        "error: {err}\n{gutter}--> line {}, column {}\n{gutter} |\n{} | {line_text}\n{gutter} | {}",
        location.line,
        location.column,
        location.line,
        underline(line_text, location.column, err.span),
    )
}

fn underline(line_text: &str, column: usize, span: TextSpan) -> String {
    let available = line_text.chars().count().saturating_sub(column - 1);
    let width = span.length.min(available).max(1);

    format!("{}{}", " ".repeat(column - 1), "^".repeat(width))
}

#[derive(Tabled)]
struct TokenRow {
    kind: String,
    text: String,
    start: usize,
    length: usize,
}

pub fn render_tokens(tokens: &[Token]) -> String {
    let rows = tokens.iter().map(|t| TokenRow {
        kind: t.kind.to_string(),
        text: t.text.clone(),
        start: t.span.start,
        length: t.span.length,
    });

    Table::new(rows).to_string()
}

pub fn render_statement(statement: &SelectStatement) -> String {
    let mut builder = Builder::default();

    builder.push_record([String::from("columns"), statement.columns.join(", ")]);
    builder.push_record([String::from("table"), statement.table.clone()]);

    if let Some(clause) = &statement.where_clause {
        builder.push_record([String::from("where"), clause.to_string()]);
    }

    builder.build().to_string()
}
