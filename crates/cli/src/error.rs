use pg_ddl::{errors::DdlError, lexer::error::LexerError};
use pg_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read or write a file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to tokenize the script: {0}")]
    Lex(#[from] LexerError),

    #[error("Failed to parse the script: {0}")]
    Parse(#[from] DdlError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to apply the script: {0}")]
    Storage(#[from] StorageError),

    #[error("No connection string: pass --conn-str or set {0}")]
    MissingConnection(&'static str),

    #[error("Script contains errors")]
    CheckFailed,
}
