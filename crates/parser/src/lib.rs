use common::{ParseError, ParseErrorCode, TextSpan};
use lexer::token::{Token, TokenKind};

use crate::ast::{ComparisonOperator, Literal, SelectStatement, WhereClause};

pub mod ast;

/// Parse a token sequence produced by [`lexer::tokenize`]. See [`Parser::parse_select`].
pub fn parse_select(tokens: &[Token]) -> Result<SelectStatement, ParseError> {
    Parser::new(tokens).parse_select()
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    pub curr_pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser {
            tokens,
            curr_pos: 0,
        }
    }

    /// Recognise `SELECT <cols> FROM <table> [WHERE <col> <op> <value>]` as a
    /// prefix of the token stream. Anything after the recognised grammar is
    /// never looked at.
    pub fn parse_select(&mut self) -> Result<SelectStatement, ParseError> {
        self.parse_select_statement()
            .inspect_err(|err| log::debug!("Parsing failed: {err}"))
    }

    fn parse_select_statement(&mut self) -> Result<SelectStatement, ParseError> {
        self.expect(TokenKind::Select)?;

        let columns = self.parse_column_list();
        log::trace!("Columns: {columns:?}");

        self.expect(TokenKind::From)?;

        let table = self.expect(TokenKind::Identifier)?.text.clone();
        log::trace!("Table: {table}");

        let where_clause = match self.is_at(TokenKind::Where) {
            true => {
                self.eat();
                Some(self.parse_where_clause()?)
            }
            false => None,
        };

        Ok(SelectStatement {
            columns,
            table,
            where_clause,
        })
    }

    // NOTE: A comma is only skipped when it directly follows a column, so
    //       `id, FROM` is accepted with one column, while `id,, name` stops
    //       after the first comma and surfaces as "expected From, found Comma".
    //       Callers pin that exact error shape; a dedicated column-list error
    //       would need a new code.
    fn parse_column_list(&mut self) -> Vec<String> {
        let mut columns = vec![];

        loop {
            match self.peek() {
                Some(token)
                    if token.kind == TokenKind::Identifier || token.kind == TokenKind::Asterisk =>
                {
                    columns.push(token.text.clone());
                    self.eat();
                }
                _ => break,
            }

            if !self.is_at(TokenKind::Comma) {
                break;
            }

            self.eat();
        }

        columns
    }

    fn parse_where_clause(&mut self) -> Result<WhereClause, ParseError> {
        let remaining = self.tokens[self.curr_pos.min(self.tokens.len())..]
            .iter()
            .take_while(|t| t.kind != TokenKind::EndOfInput)
            .count();

        if remaining < 3 {
            return Err(ParseError::new(
                ParseErrorCode::InvalidWhereClause,
                self.end_of_input_span(),
            ));
        }

        let column = self.expect(TokenKind::Identifier)?.text.clone();

        let (span, kind) = self.current();
        let operator = match kind {
            TokenKind::Equal => ComparisonOperator::Equal,
            TokenKind::GreaterThan => ComparisonOperator::GreaterThan,
            TokenKind::LessThan => ComparisonOperator::LessThan,
            _ => {
                return Err(ParseError::unexpected_token(
                    span,
                    Some(TokenKind::Equal),
                    Some(kind),
                ))
            }
        };
        self.eat();

        // Either a number or a string is fine, so there's no single `expected` kind.
        let value = match self.peek() {
            Some(t) if t.kind == TokenKind::Number => Literal::Number(t.text.clone()),
            Some(t) if t.kind == TokenKind::StringLiteral => Literal::String(t.text.clone()),
            _ => {
                let (span, kind) = self.current();
                return Err(ParseError::unexpected_token(span, None, Some(kind)));
            }
        };
        self.eat();

        log::trace!("Where: {column} {operator} {value}");

        Ok(WhereClause {
            column,
            operator,
            value,
        })
    }

    // Consume the next token if it's of the expected kind, otherwise fail
    // pointing at whatever is there instead.
    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.eat();
                Ok(token)
            }
            _ => {
                let (span, actual) = self.current();
                Err(ParseError::unexpected_token(span, Some(kind), Some(actual)))
            }
        }
    }

    // Get the next token without consuming it
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.curr_pos)
    }

    // Span and kind of the next token, or of the end of input if we've run past it.
    fn current(&self) -> (TextSpan, TokenKind) {
        match self.peek() {
            Some(token) => (token.span, token.kind),
            None => (self.tail_span(), TokenKind::EndOfInput),
        }
    }

    fn is_at(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    // Move past the next token
    fn eat(&mut self) {
        if self.curr_pos < self.tokens.len() {
            self.curr_pos += 1;
        }
    }

    fn end_of_input_span(&self) -> TextSpan {
        self.tokens
            .iter()
            .find(|t| t.kind == TokenKind::EndOfInput)
            .map(|t| t.span)
            .unwrap_or_else(|| self.tail_span())
    }

    // Last token's span. An empty sequence behaves like a lone end of input at 0.
    fn tail_span(&self) -> TextSpan {
        self.tokens.last().map(|t| t.span).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn parse(sql: &str) -> Result<SelectStatement, ParseError> {
        let tokens = tokenize(sql).unwrap();
        parse_select(&tokens)
    }

    #[test]
    fn test_simple_select_statement() {
        let statement = parse("SELECT id, name FROM users").unwrap();

        let expected = SelectStatement {
            columns: vec![String::from("id"), String::from("name")],
            table: String::from("users"),
            where_clause: None,
        };

        assert_eq!(statement, expected);
    }

    #[test]
    fn test_select_with_where() {
        let statement = parse("SELECT id, name FROM users WHERE age > 18").unwrap();

        let expected = SelectStatement {
            columns: vec![String::from("id"), String::from("name")],
            table: String::from("users"),
            where_clause: Some(WhereClause {
                column: String::from("age"),
                operator: ComparisonOperator::GreaterThan,
                value: Literal::Number(String::from("18")),
            }),
        };

        assert_eq!(statement, expected);
    }

    #[test]
    fn test_where_with_string_literal() {
        let statement = parse("SELECT id, name FROM users WHERE name = 'Doğa'").unwrap();

        assert_eq!(statement.where_column(), Some("name"));
        assert_eq!(statement.where_operator(), Some("="));
        assert_eq!(statement.where_value(), Some("Doğa"));
    }

    #[test]
    fn test_where_less_than() {
        let statement = parse("SELECT * FROM orders WHERE total < 100").unwrap();

        assert_eq!(
            statement.where_clause.map(|w| w.operator),
            Some(ComparisonOperator::LessThan)
        );
    }

    #[test]
    fn test_wildcard_and_columns() {
        let statement = parse("SELECT *, name FROM users").unwrap();

        assert_eq!(statement.columns, vec!["*", "name"]);
        assert_eq!(statement.where_clause, None);
    }

    #[test]
    fn test_empty_column_list() {
        let statement = parse("SELECT FROM users").unwrap();

        assert!(statement.columns.is_empty());
        assert_eq!(statement.table, "users");
    }

    #[test]
    fn test_missing_select() {
        let err = parse("FROM users").unwrap_err();

        let expected = ParseError::unexpected_token(
            TextSpan::new(0, 4),
            Some(TokenKind::Select),
            Some(TokenKind::From),
        );

        assert_eq!(err, expected);
    }

    #[test]
    fn test_missing_from() {
        let sql = "SELECT id";
        let err = parse(sql).unwrap_err();

        assert_eq!(err.code, ParseErrorCode::UnexpectedToken);
        assert_eq!(err.expected, Some(TokenKind::From));
        assert_eq!(err.actual, Some(TokenKind::EndOfInput));
        assert_eq!(err.span, TextSpan::new(sql.len(), 0));
    }

    #[test]
    fn test_columns_without_comma() {
        let err = parse("SELECT id name FROM users").unwrap_err();

        // The list ends at the first column not followed by a comma.
        let expected = ParseError::unexpected_token(
            TextSpan::new(10, 4),
            Some(TokenKind::From),
            Some(TokenKind::Identifier),
        );

        assert_eq!(err, expected);
    }

    #[test]
    fn test_missing_table_name() {
        let sql = "SELECT id FROM";
        let err = parse(sql).unwrap_err();

        assert_eq!(err.code, ParseErrorCode::UnexpectedToken);
        assert_eq!(err.expected, Some(TokenKind::Identifier));
        assert_eq!(err.span.start, sql.len());
    }

    #[test]
    fn test_keyword_as_table_name() {
        let err = parse("SELECT id FROM where").unwrap_err();

        assert_eq!(err.expected, Some(TokenKind::Identifier));
        assert_eq!(err.actual, Some(TokenKind::Where));
        assert_eq!(err.span, TextSpan::new(15, 5));
    }

    #[test]
    fn test_where_too_short() {
        let sql = "SELECT id FROM users WHERE age";
        let err = parse(sql).unwrap_err();

        let expected =
            ParseError::new(ParseErrorCode::InvalidWhereClause, TextSpan::new(sql.len(), 0));

        assert_eq!(err, expected);
    }

    #[test]
    fn test_where_missing_value() {
        let sql = "SELECT id FROM users WHERE age >";
        let err = parse(sql).unwrap_err();

        assert_eq!(err.code, ParseErrorCode::InvalidWhereClause);
        assert_eq!(err.span, TextSpan::new(sql.len(), 0));
    }

    #[test]
    fn test_where_trailing_semicolon_does_not_count() {
        let err = parse("SELECT id FROM users WHERE age;").unwrap_err();

        // `age` and `;` are only two tokens.
        assert_eq!(err.code, ParseErrorCode::InvalidWhereClause);
    }

    #[test]
    fn test_where_bad_column() {
        let err = parse("SELECT id FROM users WHERE 1 = 1").unwrap_err();

        assert_eq!(err.code, ParseErrorCode::UnexpectedToken);
        assert_eq!(err.expected, Some(TokenKind::Identifier));
        assert_eq!(err.actual, Some(TokenKind::Number));
        assert_eq!(err.span, TextSpan::new(27, 1));
    }

    #[test]
    fn test_where_bad_operator() {
        let err = parse("SELECT id FROM users WHERE age age 1").unwrap_err();

        let expected = ParseError::unexpected_token(
            TextSpan::new(31, 3),
            Some(TokenKind::Equal),
            Some(TokenKind::Identifier),
        );

        assert_eq!(err, expected);
    }

    #[test]
    fn test_where_bad_value() {
        let err = parse("SELECT id FROM users WHERE age = invalid").unwrap_err();

        assert_eq!(err.code, ParseErrorCode::UnexpectedToken);
        assert_eq!(err.expected, None);
        assert_eq!(err.actual, Some(TokenKind::Identifier));
        assert_eq!(err.span, TextSpan::new(33, 7));
    }

    #[test]
    fn test_trailing_content_is_ignored() {
        let statement = parse("SELECT id FROM users; SELECT nonsense ,,").unwrap();

        assert_eq!(statement.table, "users");
        assert_eq!(statement.where_clause, None);

        let statement = parse("SELECT id FROM users WHERE a = 1 extra = 2").unwrap();

        assert_eq!(statement.where_value(), Some("1"));
    }

    #[test]
    fn test_without_end_of_input_sentinel() {
        let tokens = tokenize("SELECT id").unwrap();
        let without_sentinel = &tokens[..tokens.len() - 1];

        let err = parse_select(without_sentinel).unwrap_err();

        // Falls back to the last token we do have.
        assert_eq!(err.expected, Some(TokenKind::From));
        assert_eq!(err.actual, Some(TokenKind::EndOfInput));
        assert_eq!(err.span, TextSpan::new(7, 2));
    }

    #[test]
    fn test_empty_token_sequence() {
        let err = parse_select(&[]).unwrap_err();

        let expected = ParseError::unexpected_token(
            TextSpan::new(0, 0),
            Some(TokenKind::Select),
            Some(TokenKind::EndOfInput),
        );

        assert_eq!(err, expected);
    }

    #[test]
    fn test_cursor_position_after_parse() {
        let tokens = tokenize("SELECT a, b FROM t WHERE x = 1;").unwrap();
        let mut parser = Parser::new(&tokens);

        parser.parse_select().unwrap();

        // Stops right before the semicolon.
        assert_eq!(tokens[parser.curr_pos].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_display_round_trip() {
        let statement = parse("select ID,name from Users where NAME = 'Bob'").unwrap();

        assert_eq!(
            statement.to_string(),
            "SELECT id, name FROM users WHERE name = 'Bob'"
        );
    }
}
