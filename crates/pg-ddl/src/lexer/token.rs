use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub span: (usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    // Identifiers and keywords share one kind; the parser decides by context.
    Word,
    QuotedIdentifier,

    // Literals
    String,
    Number,

    // Operators
    Operator,
    DoubleColon, // ::

    // Delimiters
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]
    Comma,        // ,
    Semicolon,    // ;
    Dot,          // .

    // Special
    Eof,
}

impl Token {
    pub fn eof(line: usize, column: usize, offset: usize) -> Self {
        Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line,
            column,
            span: (offset, offset),
        }
    }

    /// Compares the token against a keyword or punctuation string.
    ///
    /// Keywords only ever match bare words, case-insensitively. Quoted
    /// identifiers and string literals never match, so `"check"` stays a
    /// column name.
    pub fn matches(&self, expected: &str) -> bool {
        match self.kind {
            TokenKind::Word => self.lexeme.eq_ignore_ascii_case(expected),
            TokenKind::QuotedIdentifier | TokenKind::String | TokenKind::Eof => false,
            _ => self.lexeme == expected,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// True for tokens that can stand for a name: bare words and quoted identifiers.
    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, TokenKind::Word | TokenKind::QuotedIdentifier)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Word => write!(f, "word"),
            TokenKind::QuotedIdentifier => write!(f, "quoted identifier"),
            TokenKind::String => write!(f, "string"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Operator => write!(f, "operator"),
            TokenKind::DoubleColon => write!(f, "::"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::LeftBracket => write!(f, "["),
            TokenKind::RightBracket => write!(f, "]"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}
