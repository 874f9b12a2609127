use crate::error::CliError;
use pg_ddl::{ast::table::TableDefinition, lexer::token::Token};
use std::path::Path;

/// One token per line: `line:column kind lexeme`.
pub fn token_listing(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| format!("{}:{}\t{}\t{}", t.line, t.column, t.kind, t))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn tables_json(tables: &[TableDefinition]) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(tables)?)
}

pub fn rendered_script(tables: &[TableDefinition]) -> String {
    tables
        .iter()
        .map(TableDefinition::to_sql)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Writes `content` to `path`, or prints it when no path is given.
pub async fn emit(content: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(path) => tokio::fs::write(path, content).await?,
        None => println!("{content}"),
    }
    Ok(())
}
