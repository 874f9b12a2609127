//! Forward-only access to a lexed statement.
//!
//! The parser never looks further than the current token, so the cursor has
//! no peek-ahead and no rewind.

use crate::{errors::ParseError, lexer::token::Token};

pub trait TokenCursor {
    /// Token under the cursor. At the end of the stream this is the `Eof` token.
    fn current(&self) -> &Token;

    /// Index of the current token.
    fn position(&self) -> usize;

    /// Moves one token forward. A no-op once `Eof` is reached.
    fn advance(&mut self);

    fn current_text(&self) -> &str {
        &self.current().lexeme
    }

    fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    fn check(&self, expected: &str) -> bool {
        self.current().matches(expected)
    }

    /// Asserts the current token and consumes it.
    fn expect(&mut self, expected: &str) -> Result<Token, ParseError> {
        if !self.check(expected) {
            return Err(self.unexpected(expected));
        }
        let token = self.current().clone();
        self.advance();
        Ok(token)
    }

    /// Consumes a keyword group such as `IF NOT EXISTS` as one unit.
    ///
    /// Returns `false` without moving when the first token is absent. Once the
    /// first token matched, the rest of the group is mandatory.
    fn expect_sequence(&mut self, expected: &[&str]) -> Result<bool, ParseError> {
        let Some((first, rest)) = expected.split_first() else {
            return Ok(false);
        };
        if !self.consume_if(first) {
            return Ok(false);
        }
        for token in rest {
            self.expect(token)?;
        }
        Ok(true)
    }

    fn consume_if(&mut self, expected: &str) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::at(self.current(), self.position(), expected)
    }
}

/// Cursor over an owned token vector, as produced by the lexer.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    /// Wraps `tokens`, appending an `Eof` token if the vector lacks one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| !t.is_eof()) {
            let (line, column, offset) = tokens
                .last()
                .map(|t| (t.line, t.column + t.lexeme.len(), t.span.1))
                .unwrap_or((1, 0, 0));
            tokens.push(Token::eof(line, column, offset));
        }
        TokenStream { tokens, pos: 0 }
    }

    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.pos..]
    }
}

impl TokenCursor for TokenStream {
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }
}
