//! Catalog inspection: tables, schemas, and name search.

use std::fmt;

use lakehouse_core::Result;
use serde::Serialize;

use crate::client::{query_error, DuckDbClient};
use crate::table::TextTable;

/// Pattern used when no search pattern is given.
pub const DEFAULT_SEARCH_PATTERN: &str = "%ad%";

/// A table or view visible in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRef {
    pub table_schema: String,
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaRef {
    pub catalog_name: String,
    pub schema_name: String,
}

/// Output of a full inspection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub tables: Vec<TableRef>,
    pub schemas: Vec<SchemaRef>,
    pub pattern: String,
    pub matches: Vec<TableRef>,
}

/// Lists every table in the database.
pub fn list_tables(client: &DuckDbClient) -> Result<Vec<TableRef>> {
    fetch_tables(
        client,
        "SELECT table_schema, table_name FROM information_schema.tables \
         ORDER BY table_schema, table_name",
        None,
    )
}

/// Lists every schema in the database.
pub fn list_schemas(client: &DuckDbClient) -> Result<Vec<SchemaRef>> {
    let mut stmt = client
        .inner()
        .prepare(
            "SELECT catalog_name, schema_name FROM information_schema.schemata \
             ORDER BY catalog_name, schema_name",
        )
        .map_err(query_error)?;
    let schemas = stmt
        .query_map([], |row| {
            Ok(SchemaRef {
                catalog_name: row.get(0)?,
                schema_name: row.get(1)?,
            })
        })
        .map_err(query_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_error)?;
    Ok(schemas)
}

/// Finds tables whose name matches a SQL `LIKE` pattern.
pub fn search_tables(client: &DuckDbClient, pattern: &str) -> Result<Vec<TableRef>> {
    fetch_tables(
        client,
        "SELECT table_schema, table_name FROM information_schema.tables \
         WHERE table_name LIKE ? ORDER BY table_schema, table_name",
        Some(pattern),
    )
}

/// Runs all three listings.
pub fn inspect(client: &DuckDbClient, pattern: &str) -> Result<Inspection> {
    Ok(Inspection {
        tables: list_tables(client)?,
        schemas: list_schemas(client)?,
        pattern: pattern.to_string(),
        matches: search_tables(client, pattern)?,
    })
}

fn fetch_tables(client: &DuckDbClient, sql: &str, pattern: Option<&str>) -> Result<Vec<TableRef>> {
    let mut stmt = client.inner().prepare(sql).map_err(query_error)?;
    let map_row = |row: &duckdb::Row<'_>| -> duckdb::Result<TableRef> {
        Ok(TableRef {
            table_schema: row.get(0)?,
            table_name: row.get(1)?,
        })
    };
    let rows = match pattern {
        Some(p) => stmt.query_map(duckdb::params![p], map_row),
        None => stmt.query_map([], map_row),
    }
    .map_err(query_error)?
    .collect::<std::result::Result<Vec<_>, _>>()
    .map_err(query_error)?;
    Ok(rows)
}

fn table_refs(refs: &[TableRef]) -> TextTable {
    let mut table = TextTable::new(["table_schema", "table_name"]);
    for r in refs {
        table.push_row([r.table_schema.as_str(), r.table_name.as_str()]);
    }
    table
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== All Tables in Database ===")?;
        write!(f, "{}", table_refs(&self.tables))?;

        writeln!(f, "\n=== All Schemas ===")?;
        let mut schemas = TextTable::new(["catalog_name", "schema_name"]);
        for s in &self.schemas {
            schemas.push_row([s.catalog_name.as_str(), s.schema_name.as_str()]);
        }
        write!(f, "{}", schemas)?;

        writeln!(f, "\n=== Searching for '{}' ===", self.pattern)?;
        write!(f, "{}", table_refs(&self.matches))
    }
}
