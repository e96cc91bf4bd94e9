use std::{collections::HashMap, fmt, sync::LazyLock};

pub use common::{TextSpan, TokenKind};

static KEYWORDS: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    HashMap::from([
        ("select", TokenKind::Select),
        ("from", TokenKind::From),
        ("where", TokenKind::Where),
    ])
});

/// Look up an already-lowercased word in the keyword table.
pub fn keyword(word: &str) -> Option<TokenKind> {
    KEYWORDS.get(word).copied()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Lowercased for keywords and identifiers, unquoted for string literals.
    pub text: String,
    pub span: TextSpan,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, text: impl Into<String>, span: TextSpan) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    pub(crate) fn end_of_input(position: usize) -> Self {
        Token::new(TokenKind::EndOfInput, String::new(), TextSpan::new(position, 0))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}' @ {}", self.kind, self.text, self.span.start)
    }
}
