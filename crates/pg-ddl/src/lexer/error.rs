use crate::lexer::grammar::Rule;
use pest::error::{Error as PestError, InputLocation, LineColLocation};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerError {
    /// No token rule matches at this point of the input.
    #[error("Lex error at line {line}, column {column}: {}", describe(.found))]
    UnrecognizedInput {
        found: Option<char>,
        line: usize,
        column: usize,
        snippet: String,
    },
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("unrecognized character '{c}'"),
        None => "unexpected end of input".to_string(),
    }
}

impl LexerError {
    pub(crate) fn from_pest(err: PestError<Rule>, input: &str) -> Self {
        let (line, column) = match err.line_col {
            LineColLocation::Pos(pos) | LineColLocation::Span(pos, _) => pos,
        };
        let offset = match err.location {
            InputLocation::Pos(at) | InputLocation::Span((at, _)) => at,
        };

        LexerError::UnrecognizedInput {
            found: input.get(offset..).and_then(|rest| rest.chars().next()),
            line,
            column,
            snippet: err.line().to_string(),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            LexerError::UnrecognizedInput { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            LexerError::UnrecognizedInput { column, .. } => *column,
        }
    }

    /// Message preceded by the offending source line and a caret under the column.
    pub fn format_error(&self) -> String {
        let LexerError::UnrecognizedInput { snippet, column, .. } = self;
        format!(
            "{self}\n{snippet}\n{}^",
            " ".repeat(column.saturating_sub(1))
        )
    }
}
