//! DuckDB client wrapper.

use duckdb::{AccessMode, Config, Connection};
use lakehouse_core::{DbErrorCode, Error, Result};
use tracing::info;

use crate::config::DuckDbConfig;

/// Single-connection DuckDB client. The connection closes on drop.
pub struct DuckDbClient {
    inner: Connection,
    config: DuckDbConfig,
}

impl DuckDbClient {
    /// Opens the database file named in `config`.
    pub fn open(config: DuckDbConfig) -> Result<Self> {
        config.check()?;

        let inner = if config.is_in_memory() {
            Connection::open_in_memory()
        } else if config.read_only {
            Config::default()
                .access_mode(AccessMode::ReadOnly)
                .and_then(|flags| Connection::open_with_flags(&config.path, flags))
        } else {
            Connection::open(&config.path)
        }
        .map_err(|e| {
            Error::database(
                DbErrorCode::OpenFailed,
                format!("failed to open {}: {}", config.path.display(), e),
            )
        })?;

        info!(
            path = %config.path.display(),
            schema = %config.schema,
            read_only = config.read_only,
            "Opened DuckDB database"
        );

        Ok(Self { inner, config })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(DuckDbConfig::in_memory())
    }

    /// Returns the inner duckdb connection.
    pub fn inner(&self) -> &Connection {
        &self.inner
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DuckDbConfig {
        &self.config
    }

    /// Schema-qualified table name.
    pub fn table(&self, name: &str) -> String {
        format!("{}.{}", self.config.schema, name)
    }
}

/// Maps a duckdb error to `DB_001`.
pub(crate) fn query_error(e: duckdb::Error) -> Error {
    Error::database(DbErrorCode::QueryFailed, format!("Query error: {}", e))
}
