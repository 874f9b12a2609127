use crate::{connect::connect_client, error::StorageError};
use async_trait::async_trait;
use pg_ddl::ast::table::TableDefinition;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tokio_postgres::Client;
use tracing::{debug, error, info};

/// Sink for DDL statements.
#[async_trait]
pub trait DdlExecutor: Send + Sync {
    /// Runs one or more raw statements.
    async fn exec(&self, sql: &str) -> Result<(), StorageError>;

    /// Renders and runs a parsed definition.
    async fn create_table(&self, table: &TableDefinition) -> Result<(), StorageError> {
        info!(table = %table.name, "Creating table");
        self.exec(&table.to_sql()).await
    }
}

#[derive(Clone)]
pub struct PgStorage {
    client: Arc<RwLock<Client>>,
}

impl PgStorage {
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let client = connect_client(url).await?;
        debug!("Connected to PostgreSQL");
        Ok(PgStorage {
            client: Arc::new(RwLock::new(client)),
        })
    }

    pub async fn lock_client(&self) -> RwLockWriteGuard<'_, Client> {
        self.client.write().await
    }

    /// Creates every table inside a single transaction; nothing is kept
    /// when any statement fails.
    pub async fn create_tables(&self, tables: &[TableDefinition]) -> Result<(), StorageError> {
        const BEGIN: &str = "BEGIN";
        const COMMIT: &str = "COMMIT";

        let mut client = self.lock_client().await;
        let tx = client
            .transaction()
            .await
            .map_err(|e| log_failure(StorageError::normalize(&e, BEGIN)))?;

        for table in tables {
            let sql = table.to_sql();
            info!(table = %table.name, "Creating table");
            tx.batch_execute(&sql)
                .await
                .map_err(|e| log_failure(StorageError::normalize(&e, &sql)))?;
        }

        tx.commit()
            .await
            .map_err(|e| log_failure(StorageError::normalize(&e, COMMIT)))?;
        info!(count = tables.len(), "Committed table definitions");
        Ok(())
    }
}

#[async_trait]
impl DdlExecutor for PgStorage {
    async fn exec(&self, sql: &str) -> Result<(), StorageError> {
        let client = self.client.read().await;
        debug!(sql, "Executing statement");
        client
            .batch_execute(sql)
            .await
            .map_err(|e| log_failure(StorageError::normalize(&e, sql)))
    }
}

fn log_failure(err: StorageError) -> StorageError {
    error!(error = %err, sql = err.sql().unwrap_or_default(), "Statement failed");
    err
}
