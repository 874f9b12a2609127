use serde::{Deserialize, Serialize};
use std::fmt;

/// Token span isolated from a `CHECK`, `DEFAULT`, partition key or similar
/// position. It is captured, not evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expression {
    pub tokens: Vec<String>,
}

impl Expression {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<&str> for Expression {
    fn from(token: &str) -> Self {
        Self::new(vec![token.to_string()])
    }
}

fn glue_left(token: &str) -> bool {
    matches!(token, "(" | "[" | "::" | ".")
}

fn glue_right(token: &str) -> bool {
    matches!(token, ")" | "]" | "," | "::" | "." | "[")
}

/// Word-shaped operators that take a parenthesized operand rather than
/// naming a function.
const KEYWORD_OPERATORS: [&str; 10] = [
    "AND", "OR", "NOT", "IN", "IS", "LIKE", "ILIKE", "BETWEEN", "SIMILAR", "ESCAPE",
];

/// `(` directly after a name opens an argument list: `lower(name)`.
fn is_call_target(token: &str) -> bool {
    let starts_name = token
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '"');
    starts_name
        && !KEYWORD_OPERATORS
            .iter()
            .any(|keyword| keyword.eq_ignore_ascii_case(token))
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prev: Option<&str> = None;
        for token in &self.tokens {
            if let Some(p) = prev
                && !glue_left(p)
                && !glue_right(token)
                && !(token == "(" && is_call_target(p))
            {
                write!(f, " ")?;
            }
            write!(f, "{token}")?;
            prev = Some(token);
        }
        Ok(())
    }
}
