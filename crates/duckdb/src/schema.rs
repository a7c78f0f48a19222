//! DuckDB table schemas.
//!
//! Column order matches the seed CSV headers so `COPY ... (HEADER)` maps
//! columns positionally. `{schema}` is replaced with the configured schema.

use lakehouse_core::{Result, SeedFile};
use tracing::debug;

use crate::client::{query_error, DuckDbClient};

/// SQL for creating the content catalog table.
pub const CREATE_CONTENT_CATALOG_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS {schema}.content_catalog (
    content_id VARCHAR,
    title VARCHAR,
    genre VARCHAR,
    rating VARCHAR,
    duration_s INTEGER,
    release_year SMALLINT
)
"#;

/// SQL for creating the impressions table.
pub const CREATE_AD_EVENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS {schema}.ad_events (
    event_ts TIMESTAMP,
    event_type VARCHAR,
    user_id_hash VARCHAR,
    impression_id VARCHAR,
    campaign_id VARCHAR,
    content_id VARCHAR,
    placement VARCHAR,
    device VARCHAR,
    geo VARCHAR,
    view_time_ms INTEGER,
    pct_quartile TINYINT,
    -- 0/1 flags, summed by the CTR report
    audible TINYINT,
    clicked TINYINT
)
"#;

/// SQL for creating the conversions table.
pub const CREATE_CONVERSIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS {schema}.conversions (
    conversion_id VARCHAR,
    event_ts TIMESTAMP,
    user_id_hash VARCHAR,
    campaign_id VARCHAR,
    conversion_type VARCHAR,
    revenue DECIMAL(10, 2)
)
"#;

/// DDL for the table a seed file loads into.
pub fn create_table_sql(seed: SeedFile) -> &'static str {
    match seed {
        SeedFile::ContentCatalog => CREATE_CONTENT_CATALOG_TABLE,
        SeedFile::AdEvents => CREATE_AD_EVENTS_TABLE,
        SeedFile::Conversions => CREATE_CONVERSIONS_TABLE,
    }
}

/// All DDL statements in creation order, rendered for `schema`.
pub fn all_tables(schema: &str) -> Vec<String> {
    let mut ddl = vec![format!("CREATE SCHEMA IF NOT EXISTS {}", schema)];
    ddl.extend(
        SeedFile::ALL
            .iter()
            .map(|seed| create_table_sql(*seed).replace("{schema}", schema)),
    );
    ddl
}

/// Creates the schema and the three tables if missing.
pub fn init_schema(client: &DuckDbClient) -> Result<()> {
    for ddl in all_tables(&client.config().schema) {
        client.inner().execute_batch(&ddl).map_err(query_error)?;
    }

    debug!(schema = %client.config().schema, "DuckDB schema initialized");
    Ok(())
}
