//! DuckDB health checks.

use crate::client::DuckDbClient;
use tracing::{debug, error};

/// Check DuckDB connection health.
pub fn check_connection(client: &DuckDbClient) -> bool {
    match client
        .inner()
        .query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
    {
        Ok(_) => {
            debug!("DuckDB connection healthy");
            true
        }
        Err(e) => {
            error!("DuckDB health check failed: {}", e);
            false
        }
    }
}
