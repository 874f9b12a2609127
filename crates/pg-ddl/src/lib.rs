//! PostgreSQL `CREATE TABLE` parsing: lexer, token cursor, AST and renderer.

pub mod ast;
pub mod cursor;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod render;

use crate::{
    ast::table::TableDefinition,
    cursor::{TokenCursor, TokenStream},
    errors::DdlError,
    lexer::{Lexer, error::LexerError},
    parser::CreateTableParser,
};

pub fn tokenize(sql: &str) -> Result<TokenStream, LexerError> {
    Ok(TokenStream::new(Lexer::new().tokenize(sql)?))
}

/// Parses text holding exactly one `CREATE TABLE` statement.
pub fn parse_create_table(sql: &str) -> Result<TableDefinition, DdlError> {
    let mut tokens = tokenize(sql)?;
    let table = CreateTableParser::new().parse_tokens(&mut tokens)?;

    if !tokens.is_at_end() {
        return Err(tokens.unexpected("end of input").into());
    }
    Ok(table)
}

/// Parses consecutive `CREATE TABLE` statements; stray `;` are skipped.
pub fn parse_script(sql: &str) -> Result<Vec<TableDefinition>, DdlError> {
    let mut tokens = tokenize(sql)?;
    let parser = CreateTableParser::new();
    let mut tables = Vec::new();

    while !tokens.is_at_end() {
        if tokens.consume_if(";") {
            continue;
        }
        tables.push(parser.parse_tokens(&mut tokens)?);
    }

    Ok(tables)
}
