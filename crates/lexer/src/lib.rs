use common::{ParseError, ParseErrorCode};
use token::*;
pub mod token;

pub struct Lexer {
    chars: Vec<char>,
    len: usize,
    pos: usize,
}

/// Tokenize `input` in one pass. See [`Lexer::lex`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input).lex()
}

impl Lexer {
    pub fn new(buf: &str) -> Lexer {
        let chars: Vec<char> = buf.chars().collect();
        let len = chars.len();
        Lexer { chars, len, pos: 0 }
    }

    /// Scan the whole input left to right. On success the returned tokens
    /// always end with a zero-length [`TokenKind::EndOfInput`] at the input's
    /// end offset. The first unrecognised character or unclosed string
    /// aborts the scan.
    ///
    /// Offsets in every span are character indices, not byte offsets.
    pub fn lex(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        loop {
            if self.pos >= self.len {
                tokens.push(Token::end_of_input(self.len));
                break;
            }

            let start = self.pos;
            let curr_ch = self.chars[start];

            let token = match curr_ch {
                c if c.is_whitespace() => {
                    self.pos += 1;
                    continue;
                }
                ',' => self.single(TokenKind::Comma, start),
                ';' => self.single(TokenKind::Semicolon, start),
                '*' => self.single(TokenKind::Asterisk, start),
                '=' => self.single(TokenKind::Equal, start),
                '>' => self.single(TokenKind::GreaterThan, start),
                '<' => self.single(TokenKind::LessThan, start),
                // Single-quote String
                '\'' => {
                    let close = self.scan_until(start + 1, |c| c == '\'');

                    if close >= self.len {
                        let err = ParseError::new(
                            ParseErrorCode::UnterminatedString,
                            TextSpan::new(start, close - start),
                        );
                        log::debug!("Lexing failed: {err}");
                        return Err(err);
                    }

                    self.pos = close + 1;

                    Token::new(
                        TokenKind::StringLiteral,
                        self.text(start + 1, close),
                        span_between(start, self.pos),
                    )
                }
                c if c.is_ascii_digit() => {
                    let end = self.scan_until(start, |c| !c.is_ascii_digit());
                    self.pos = end;

                    Token::new(
                        TokenKind::Number,
                        self.text(start, end),
                        span_between(start, end),
                    )
                }
                // Keyword or Identifier
                c if c.is_alphabetic() => {
                    let end = self.scan_until(start, |c| !(c.is_alphanumeric() || c == '_'));
                    self.pos = end;

                    let word = self.lowercase(start, end);
                    let kind = keyword(&word).unwrap_or(TokenKind::Identifier);

                    Token::new(kind, word, span_between(start, end))
                }
                _ => {
                    let err = ParseError::new(ParseErrorCode::UnexpectedChar, TextSpan::new(start, 1));
                    log::debug!("Lexing failed on {curr_ch:?}: {err}");
                    return Err(err);
                }
            };

            log::trace!("{token}");
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Emit a one-character token whose text is the character itself.
    fn single(&mut self, kind: TokenKind, start: usize) -> Token {
        self.pos += 1;
        Token::new(kind, self.chars[start], TextSpan::new(start, 1))
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Lowercase one character at a time. Characters whose lowercase form is
    /// more than one character (e.g. `İ`) are kept as-is, so the text stays
    /// exactly as long as its span.
    fn lowercase(&self, start: usize, end: usize) -> String {
        self.chars[start..end]
            .iter()
            .map(|&c| {
                let mut lower = c.to_lowercase();
                match (lower.next(), lower.next()) {
                    (Some(l), None) => l,
                    _ => c,
                }
            })
            .collect()
    }

    /// Given the function end_func, scan the input until the func returns true,
    /// returning the index at that point (or the input length if it never does).
    fn scan_until<F>(&self, start_offset: usize, end_func: F) -> usize
    where
        F: Fn(char) -> bool,
    {
        let mut cursor = start_offset;

        loop {
            if cursor >= self.len {
                break;
            }

            if end_func(self.chars[cursor]) {
                break;
            }

            cursor += 1;
        }

        cursor
    }
}

fn span_between(start: usize, end: usize) -> TextSpan {
    TextSpan::new(start, end - start)
}
