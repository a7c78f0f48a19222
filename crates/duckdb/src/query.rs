//! Fixed analytic queries over the loaded tables.
//!
//! Rates come back as `None` when `ad_events` is empty. Integer aggregates
//! are cast to BIGINT so every column decodes to a fixed Rust type.

use std::fmt;

use chrono::NaiveDateTime;
use lakehouse_core::{Result, SeedFile, TIMESTAMP_FORMAT};
use serde::Serialize;

use crate::client::{query_error, DuckDbClient};
use crate::table::TextTable;

/// View time at or above which an impression counts as viewable.
pub const VIEWABLE_THRESHOLD_MS: u32 = 2000;

pub const ROW_COUNTS_SQL: &str = r#"
SELECT 'ad_events' AS table_name, COUNT(*) AS rows FROM {schema}.ad_events
UNION ALL
SELECT 'content_catalog', COUNT(*) FROM {schema}.content_catalog
UNION ALL
SELECT 'conversions', COUNT(*) FROM {schema}.conversions
"#;

pub const VIEWABILITY_SQL: &str = r#"
SELECT
    COUNT(*) AS total_impressions,
    CAST(COALESCE(SUM(CASE WHEN view_time_ms >= 2000 THEN 1 ELSE 0 END), 0) AS BIGINT) AS viewable_impressions,
    CAST(ROUND(100.0 * SUM(CASE WHEN view_time_ms >= 2000 THEN 1 ELSE 0 END) / NULLIF(COUNT(*), 0), 2) AS DOUBLE) AS viewability_rate_pct
FROM {schema}.ad_events
"#;

pub const CLICK_THROUGH_SQL: &str = r#"
SELECT
    COUNT(*) AS total_impressions,
    CAST(COALESCE(SUM(clicked), 0) AS BIGINT) AS clicks,
    CAST(ROUND(100.0 * SUM(clicked) / NULLIF(COUNT(*), 0), 2) AS DOUBLE) AS ctr_pct
FROM {schema}.ad_events
"#;

pub const DATE_RANGE_SQL: &str = r#"
SELECT
    strftime(MIN(event_ts), '%Y-%m-%dT%H:%M:%S') AS first_event,
    strftime(MAX(event_ts), '%Y-%m-%dT%H:%M:%S') AS last_event,
    COUNT(DISTINCT user_id_hash) AS unique_users
FROM {schema}.ad_events
"#;

fn render(sql: &str, client: &DuckDbClient) -> String {
    sql.replace("{schema}", &client.config().schema)
}

/// Row count of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRowCount {
    pub table_name: String,
    pub rows: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewabilityReport {
    pub total_impressions: i64,
    pub viewable_impressions: i64,
    pub viewability_rate_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickThroughReport {
    pub total_impressions: i64,
    pub clicks: i64,
    pub ctr_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangeReport {
    pub first_event: Option<NaiveDateTime>,
    pub last_event: Option<NaiveDateTime>,
    pub unique_users: i64,
}

/// All four reports from one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryReport {
    pub row_counts: Vec<TableRowCount>,
    pub viewability: ViewabilityReport,
    pub click_through: ClickThroughReport,
    pub date_range: DateRangeReport,
}

/// Row counts for ad_events, content_catalog, conversions (in that order).
pub fn row_counts(client: &DuckDbClient) -> Result<Vec<TableRowCount>> {
    let sql = render(ROW_COUNTS_SQL, client);
    let mut stmt = client.inner().prepare(&sql).map_err(query_error)?;
    let mut counts = stmt
        .query_map([], |row| {
            Ok(TableRowCount {
                table_name: row.get(0)?,
                rows: row.get(1)?,
            })
        })
        .map_err(query_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_error)?;

    // UNION ALL does not promise branch order
    let order = [SeedFile::AdEvents, SeedFile::ContentCatalog, SeedFile::Conversions];
    counts.sort_by_key(|c| {
        order
            .iter()
            .position(|s| s.table_name() == c.table_name)
            .unwrap_or(order.len())
    });
    Ok(counts)
}

/// Share of impressions with view time >= 2000 ms.
pub fn viewability(client: &DuckDbClient) -> Result<ViewabilityReport> {
    client
        .inner()
        .query_row(&render(VIEWABILITY_SQL, client), [], |row| {
            Ok(ViewabilityReport {
                total_impressions: row.get(0)?,
                viewable_impressions: row.get(1)?,
                viewability_rate_pct: row.get(2)?,
            })
        })
        .map_err(query_error)
}

/// Clicks over impressions.
pub fn click_through(client: &DuckDbClient) -> Result<ClickThroughReport> {
    client
        .inner()
        .query_row(&render(CLICK_THROUGH_SQL, client), [], |row| {
            Ok(ClickThroughReport {
                total_impressions: row.get(0)?,
                clicks: row.get(1)?,
                ctr_pct: row.get(2)?,
            })
        })
        .map_err(query_error)
}

/// First and last impression timestamps plus distinct hashed users.
pub fn date_range(client: &DuckDbClient) -> Result<DateRangeReport> {
    let (first, last, unique_users): (Option<String>, Option<String>, i64) = client
        .inner()
        .query_row(&render(DATE_RANGE_SQL, client), [], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })
        .map_err(query_error)?;

    Ok(DateRangeReport {
        first_event: parse_timestamp(first)?,
        last_event: parse_timestamp(last)?,
        unique_users,
    })
}

/// Runs all four reports.
pub fn run_all(client: &DuckDbClient) -> Result<QueryReport> {
    Ok(QueryReport {
        row_counts: row_counts(client)?,
        viewability: viewability(client)?,
        click_through: click_through(client)?,
        date_range: date_range(client)?,
    })
}

fn parse_timestamp(raw: Option<String>) -> Result<Option<NaiveDateTime>> {
    raw.map(|s| {
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(|e| {
            lakehouse_core::Error::validation(format!("bad timestamp '{}': {}", s, e))
        })
    })
    .transpose()
}

fn opt_pct(v: Option<f64>) -> String {
    v.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "NULL".into())
}

fn opt_ts(v: Option<NaiveDateTime>) -> String {
    v.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "NULL".into())
}

impl fmt::Display for QueryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Row Counts ===")?;
        let mut table = TextTable::new(["table_name", "rows"]);
        for count in &self.row_counts {
            table.push_row([count.table_name.clone(), count.rows.to_string()]);
        }
        write!(f, "{}", table)?;

        writeln!(f, "\n=== Viewability Rate ===")?;
        write!(f, "{}", self.viewability)?;

        writeln!(f, "\n=== Click-Through Rate ===")?;
        write!(f, "{}", self.click_through)?;

        writeln!(f, "\n=== Date Range ===")?;
        write!(f, "{}", self.date_range)
    }
}

impl fmt::Display for ViewabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = TextTable::new([
            "total_impressions",
            "viewable_impressions",
            "viewability_rate_pct",
        ]);
        table.push_row([
            self.total_impressions.to_string(),
            self.viewable_impressions.to_string(),
            opt_pct(self.viewability_rate_pct),
        ]);
        write!(f, "{}", table)
    }
}

impl fmt::Display for ClickThroughReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = TextTable::new(["total_impressions", "clicks", "ctr_pct"]);
        table.push_row([
            self.total_impressions.to_string(),
            self.clicks.to_string(),
            opt_pct(self.ctr_pct),
        ]);
        write!(f, "{}", table)
    }
}

impl fmt::Display for DateRangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = TextTable::new(["first_event", "last_event", "unique_users"]);
        table.push_row([
            opt_ts(self.first_event),
            opt_ts(self.last_event),
            self.unique_users.to_string(),
        ]);
        write!(f, "{}", table)
    }
}
