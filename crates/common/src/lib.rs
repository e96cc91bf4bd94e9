use core::fmt;

use thiserror::Error;

/// A half-open range over the character positions of the original input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextSpan {
    pub start: usize,
    pub length: usize,
}

impl TextSpan {
    pub fn new(start: usize, length: usize) -> Self {
        TextSpan { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pos {}, len {}", self.start, self.length)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Select,
    From,
    Where,
    Identifier,
    Number,
    Comma,
    Asterisk,
    Equal,
    GreaterThan,
    LessThan,
    StringLiteral,
    Semicolon,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Select => "Select",
            TokenKind::From => "From",
            TokenKind::Where => "Where",
            TokenKind::Identifier => "Identifier",
            TokenKind::Number => "Number",
            TokenKind::Comma => "Comma",
            TokenKind::Asterisk => "Asterisk",
            TokenKind::Equal => "Equal",
            TokenKind::GreaterThan => "GreaterThan",
            TokenKind::LessThan => "LessThan",
            TokenKind::StringLiteral => "StringLiteral",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::EndOfInput => "EndOfInput",
        };

        write!(f, "{name}")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseErrorCode {
    /// Absent error. Never returned as a failure.
    #[default]
    None,
    UnexpectedChar,
    UnterminatedString,
    UnexpectedToken,
    InvalidWhereClause,
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorCode::None => write!(f, "No error.")?,
            ParseErrorCode::UnexpectedChar => write!(f, "Unexpected character.")?,
            ParseErrorCode::UnterminatedString => write!(f, "Unterminated string literal.")?,
            ParseErrorCode::UnexpectedToken => write!(f, "Unexpected token.")?,
            ParseErrorCode::InvalidWhereClause => {
                write!(f, "Invalid WHERE clause. Expected <column> <operator> <value>.")?
            }
        }

        Ok(())
    }
}

/// The single failure reported by either stage of the pipeline.
///
/// `expected` and `actual` are only ever populated for
/// [`ParseErrorCode::UnexpectedToken`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Error)]
#[error("{code} ({span}){}", describe_kinds(.expected, .actual))]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub span: TextSpan,
    pub expected: Option<TokenKind>,
    pub actual: Option<TokenKind>,
}

impl ParseError {
    pub fn new(code: ParseErrorCode, span: TextSpan) -> Self {
        ParseError {
            code,
            span,
            expected: None,
            actual: None,
        }
    }

    pub fn unexpected_token(
        span: TextSpan,
        expected: Option<TokenKind>,
        actual: Option<TokenKind>,
    ) -> Self {
        ParseError {
            code: ParseErrorCode::UnexpectedToken,
            span,
            expected,
            actual,
        }
    }

    pub fn is_error(&self) -> bool {
        self.code != ParseErrorCode::None
    }
}

fn describe_kinds(expected: &Option<TokenKind>, actual: &Option<TokenKind>) -> String {
    match (expected, actual) {
        (Some(e), Some(a)) => format!(" Expected {e}, found {a}."),
        (Some(e), None) => format!(" Expected {e}."),
        (None, Some(a)) => format!(" Found {a}."),
        (None, None) => String::new(),
    }
}
