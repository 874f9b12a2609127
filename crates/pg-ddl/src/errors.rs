use crate::lexer::{error::LexerError, token::Token};
use std::fmt;
use thiserror::Error;

/// Coarse classification shared by every error type in the workspace.
///
/// Syntax failures come from reading statement text; execution failures come
/// from running a statement against a server. Layers keep their own error
/// types and only agree on this vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Syntax,
    Execution,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorClass::Syntax => write!(f, "syntax"),
            ErrorClass::Execution => write!(f, "execution"),
        }
    }
}

pub trait Classify {
    fn class(&self) -> ErrorClass;
}

/// The first syntax error met while walking the token stream.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "unexpected {} at position {position} (line {line}, column {column}): expected {expected}",
    describe_found(.found)
)]
pub struct ParseError {
    /// Offending token text; empty at end of input.
    pub found: String,
    /// Index of the offending token in the stream.
    pub position: usize,
    pub line: usize,
    pub column: usize,
    pub expected: String,
}

fn describe_found(found: &str) -> String {
    if found.is_empty() {
        "end of input".to_string()
    } else {
        format!("'{found}'")
    }
}

impl ParseError {
    pub fn at(token: &Token, position: usize, expected: impl Into<String>) -> Self {
        ParseError {
            found: token.lexeme.clone(),
            position,
            line: token.line,
            column: token.column,
            expected: expected.into(),
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        self.found.is_empty()
    }

    /// Renders the error under the offending line of `source`, with a caret.
    pub fn format_error(&self, source: &str) -> String {
        let snippet = source
            .lines()
            .nth(self.line.saturating_sub(1))
            .unwrap_or_default();
        format!(
            "Parse error at line {}, column {}:\n{}\n{}^\n{}",
            self.line,
            self.column,
            snippet,
            " ".repeat(self.column.saturating_sub(1)),
            self
        )
    }
}

impl Classify for ParseError {
    fn class(&self) -> ErrorClass {
        ErrorClass::Syntax
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DdlError {
    #[error("Lexing error: {0}")]
    Lex(#[from] LexerError),

    #[error("Parsing error: {0}")]
    Parse(#[from] ParseError),
}

impl DdlError {
    pub fn format_error(&self, source: &str) -> String {
        match self {
            DdlError::Lex(err) => err.format_error(),
            DdlError::Parse(err) => err.format_error(source),
        }
    }
}

impl Classify for DdlError {
    fn class(&self) -> ErrorClass {
        ErrorClass::Syntax
    }
}
