//! Applying parsed table definitions to a PostgreSQL server.

pub mod adapter;
mod connect;
pub mod dialect;
pub mod error;
pub mod functions;

pub use adapter::{DdlExecutor, PgStorage};
pub use error::{ConnectorError, StorageError, StorageErrorKind};
