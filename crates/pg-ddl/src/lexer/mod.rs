use crate::lexer::{
    error::LexerError,
    grammar::{Rule, SqlGrammar},
    token::{Token, TokenKind},
};
use pest::{Parser, iterators::Pair};

pub mod error;
pub mod grammar;
pub mod token;

pub struct Lexer {
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer { tokens: Vec::new() }
    }

    pub fn tokenize(&mut self, input: &str) -> Result<Vec<Token>, LexerError> {
        self.tokens.clear();

        let pairs = SqlGrammar::parse(Rule::program, input).map_err(|e| LexerError::from_pest(e, input))?;

        for pair in pairs {
            self.process_pair(pair);
        }

        Ok(self.tokens.clone())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn process_pair(&mut self, pair: Pair<Rule>) {
        let kind = match pair.as_rule() {
            Rule::word => TokenKind::Word,
            Rule::quoted_ident => TokenKind::QuotedIdentifier,
            Rule::lit_string => TokenKind::String,
            Rule::lit_number => TokenKind::Number,
            Rule::operator => TokenKind::Operator,
            Rule::double_colon => TokenKind::DoubleColon,
            Rule::lparen => TokenKind::LeftParen,
            Rule::rparen => TokenKind::RightParen,
            Rule::lbracket => TokenKind::LeftBracket,
            Rule::rbracket => TokenKind::RightBracket,
            Rule::comma => TokenKind::Comma,
            Rule::semicolon => TokenKind::Semicolon,
            Rule::dot => TokenKind::Dot,
            Rule::EOI => {
                let pos = pair.as_span().start_pos();
                let (line, column) = pos.line_col();
                self.tokens.push(Token::eof(line, column, pos.pos()));
                return;
            }

            // Recursively process other rules
            _ => {
                for inner_pair in pair.into_inner() {
                    self.process_pair(inner_pair);
                }
                return;
            }
        };

        let span = pair.as_span();
        let (line, column) = span.start_pos().line_col();
        self.tokens.push(Token {
            kind,
            lexeme: span.as_str().to_string(),
            line,
            column,
            span: (span.start(), span.end()),
        });
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}
