use pg_ddl::errors::{Classify, ErrorClass};
use thiserror::Error;

/// Closed set of failures a native PostgreSQL error is folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// Retrying the transaction may succeed (serialization failure, deadlock).
    Recoverable,
    ServerHasGoneAway,
    DuplicateKeys,
    Query,
}

impl StorageErrorKind {
    /// Maps a five-character SQLSTATE code.
    pub fn from_sqlstate(code: &str) -> Self {
        match code {
            "40001" | "40P01" => StorageErrorKind::Recoverable,
            "08006" => StorageErrorKind::ServerHasGoneAway,
            "23505" => StorageErrorKind::DuplicateKeys,
            _ => StorageErrorKind::Query,
        }
    }
}

/// Errors happening during connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Could not connect: {0}")]
    Postgres(#[from] tokio_postgres::Error),
}

/// Failures of statements sent to the server.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Recoverable error: {message}")]
    Recoverable { message: String, sql: String },

    #[error("Server has gone away: {message}")]
    ServerHasGoneAway { message: String, sql: String },

    #[error("Duplicate key: {message}")]
    DuplicateKeys { message: String, sql: String },

    #[error("Query failed: {message}")]
    Query { message: String, sql: String },

    #[error("Connection error: {0}")]
    Connection(#[from] ConnectorError),
}

impl StorageError {
    pub fn new(kind: StorageErrorKind, message: impl Into<String>, sql: &str) -> Self {
        let message = message.into();
        let sql = sql.to_string();
        match kind {
            StorageErrorKind::Recoverable => StorageError::Recoverable { message, sql },
            StorageErrorKind::ServerHasGoneAway => StorageError::ServerHasGoneAway { message, sql },
            StorageErrorKind::DuplicateKeys => StorageError::DuplicateKeys { message, sql },
            StorageErrorKind::Query => StorageError::Query { message, sql },
        }
    }

    /// Folds a driver error raised while running `sql`.
    pub fn normalize(err: &tokio_postgres::Error, sql: &str) -> Self {
        let kind = if err.is_closed() {
            StorageErrorKind::ServerHasGoneAway
        } else {
            err.code()
                .map(|state| StorageErrorKind::from_sqlstate(state.code()))
                .unwrap_or(StorageErrorKind::Query)
        };
        let message = err
            .as_db_error()
            .map(|db| db.message().to_string())
            .unwrap_or_else(|| err.to_string());

        StorageError::new(kind, message, sql)
    }

    pub fn kind(&self) -> Option<StorageErrorKind> {
        match self {
            StorageError::Recoverable { .. } => Some(StorageErrorKind::Recoverable),
            StorageError::ServerHasGoneAway { .. } => Some(StorageErrorKind::ServerHasGoneAway),
            StorageError::DuplicateKeys { .. } => Some(StorageErrorKind::DuplicateKeys),
            StorageError::Query { .. } => Some(StorageErrorKind::Query),
            StorageError::Connection(_) => None,
        }
    }

    /// Statement that failed, when the error came from one.
    pub fn sql(&self) -> Option<&str> {
        match self {
            StorageError::Recoverable { sql, .. }
            | StorageError::ServerHasGoneAway { sql, .. }
            | StorageError::DuplicateKeys { sql, .. }
            | StorageError::Query { sql, .. } => Some(sql),
            StorageError::Connection(_) => None,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind() == Some(StorageErrorKind::Recoverable)
    }
}

impl Classify for StorageError {
    fn class(&self) -> ErrorClass {
        ErrorClass::Execution
    }
}
