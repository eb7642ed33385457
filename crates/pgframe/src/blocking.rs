//! Blocking wrappers for scripts and notebooks.
//!
//! Each call drives the async API to completion on a private current-thread
//! Tokio runtime. Do not call these from inside an async context.

use arrow_array::RecordBatch;
use tokio::runtime::{Builder, Runtime};

use crate::config::DatabaseConfig;
use crate::connection::{self, IfExists};
use crate::{Error, Result};

fn runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::from)
}

/// Blocking counterpart of [`connection::DatabaseConnection`].
#[derive(Debug)]
pub struct DatabaseConnection {
    inner: connection::DatabaseConnection,
    runtime: Runtime,
}

impl DatabaseConnection {
    /// Build the pool; no network I/O.
    pub fn new(config: DatabaseConfig) -> Result<Self> {
        Ok(Self {
            inner: connection::DatabaseConnection::new(config)?,
            runtime: runtime()?,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        self.inner.config()
    }

    #[must_use]
    pub fn status(&self) -> deadpool::Status {
        self.inner.status()
    }

    pub fn close(&self) {
        self.inner.close();
    }

    pub fn write_table(
        &self,
        table: &RecordBatch,
        table_name: &str,
        if_exists: IfExists,
    ) -> Result<u64> {
        self.runtime
            .block_on(self.inner.write_table(table, table_name, if_exists))
    }

    pub fn read_table(&self, query: &str) -> Result<RecordBatch> {
        self.runtime.block_on(self.inner.read_table(query))
    }

    pub fn test_connection(&self) -> bool {
        self.runtime.block_on(self.inner.test_connection())
    }
}

/// Blocking counterpart of [`crate::bootstrap::ensure_database_exists`].
pub fn ensure_database_exists(config: &DatabaseConfig) -> Result<bool> {
    runtime()?.block_on(crate::bootstrap::ensure_database_exists(config))
}
