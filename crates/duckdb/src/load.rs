//! Bulk loading of seed CSVs into DuckDB.

use std::path::Path;

use lakehouse_core::{DbErrorCode, Error, Result, SeedFile};
use serde::Serialize;
use tracing::{info, warn};

use crate::client::{query_error, DuckDbClient};
use crate::schema::init_schema;

/// Rows loaded into one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedTable {
    pub table_name: String,
    pub rows: i64,
}

/// Replaces the contents of all three tables with the CSVs in `dir`.
///
/// Every file is checked before any table is touched, and all three tables
/// are replaced in one transaction. On any failure the database keeps the
/// rows it had before the call.
pub fn load_seeds(client: &DuckDbClient, dir: &Path) -> Result<Vec<LoadedTable>> {
    for seed in SeedFile::ALL {
        let path = seed.path_in(dir);
        if !path.is_file() {
            return Err(load_error(format!("seed file not found: {}", path.display())));
        }
    }

    init_schema(client)?;

    client
        .inner()
        .execute_batch("BEGIN TRANSACTION")
        .map_err(|e| load_error(format!("failed to start load transaction: {}", e)))?;

    for seed in SeedFile::ALL {
        if let Err(e) = replace_rows(client, seed, &seed.path_in(dir)) {
            if let Err(rollback) = client.inner().execute_batch("ROLLBACK") {
                warn!(error = %rollback, "Rollback after failed load also failed");
            }
            return Err(e);
        }
    }

    client
        .inner()
        .execute_batch("COMMIT")
        .map_err(|e| load_error(format!("failed to commit load: {}", e)))?;

    let mut loaded = Vec::with_capacity(SeedFile::ALL.len());
    for seed in SeedFile::ALL {
        let table = client.table(seed.table_name());
        let rows: i64 = client
            .inner()
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })
            .map_err(query_error)?;

        info!(table = %table, rows, file = %seed.path_in(dir).display(), "Loaded seed file");
        loaded.push(LoadedTable {
            table_name: seed.table_name().to_string(),
            rows,
        });
    }
    Ok(loaded)
}

/// Deletes a table's rows and copies in `path`. Runs inside the caller's transaction.
fn replace_rows(client: &DuckDbClient, seed: SeedFile, path: &Path) -> Result<()> {
    let table = client.table(seed.table_name());
    let sql = format!(
        "DELETE FROM {table};\nCOPY {table} FROM '{path}' (HEADER);",
        table = table,
        path = sql_string(&path.to_string_lossy()),
    );

    client.inner().execute_batch(&sql).map_err(|e| {
        load_error(format!(
            "failed to load {} into {}: {}",
            path.display(),
            table,
            e
        ))
    })
}

fn load_error(message: String) -> Error {
    Error::database(DbErrorCode::LoadFailed, message)
}

/// Escapes a value for use inside a single-quoted SQL literal.
fn sql_string(raw: &str) -> String {
    raw.replace('\'', "''")
}
