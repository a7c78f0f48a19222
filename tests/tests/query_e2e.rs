//! End-to-end tests for the report queries.
//!
//! Seeds are generated, loaded into a DuckDB file, then reopened read-only
//! and checked against values computed straight from the CSVs.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use duckdb_client::{
    click_through, date_range, load_seeds, row_counts, run_all, viewability,
    VIEWABLE_THRESHOLD_MS,
};
use integration_tests::{fixtures::read_rows, setup::TestContext};
use lakehouse_core::{SeedFile, TIMESTAMP_FORMAT};

fn pct(part: usize, total: usize) -> f64 {
    100.0 * part as f64 / total as f64
}

#[test]
fn test_row_counts_match_generated_files() {
    let ctx = TestContext::new();
    let counts = row_counts(&ctx.reader()).expect("Failed to count rows");

    let names: Vec<_> = counts.iter().map(|c| c.table_name.as_str()).collect();
    assert_eq!(names, ["ad_events", "content_catalog", "conversions"]);

    assert_eq!(counts[0].rows as u64, ctx.summary.impressions);
    assert_eq!(counts[1].rows as u64, ctx.summary.content_items);
    assert_eq!(counts[2].rows as u64, ctx.summary.conversions);

    let loaded: Vec<_> = ctx.loaded.iter().map(|t| (t.table_name.as_str(), t.rows)).collect();
    assert_eq!(
        loaded,
        [
            ("content_catalog", counts[1].rows),
            ("ad_events", counts[0].rows),
            ("conversions", counts[2].rows),
        ]
    );
}

#[test]
fn test_viewability_matches_csv() {
    let ctx = TestContext::new();
    let rows = read_rows(ctx.seeds_dir(), SeedFile::AdEvents);
    let viewable = rows
        .iter()
        .filter(|r| r[9].parse::<u32>().unwrap() >= VIEWABLE_THRESHOLD_MS)
        .count();

    let report = viewability(&ctx.reader()).expect("Failed to run viewability");
    assert_eq!(report.total_impressions as usize, rows.len());
    assert_eq!(report.viewable_impressions as usize, viewable);

    let rate = report.viewability_rate_pct.expect("rate should be present");
    assert!((0.0..=100.0).contains(&rate));
    assert!((rate - pct(viewable, rows.len())).abs() <= 0.005 + 1e-9);
}

#[test]
fn test_click_through_matches_csv() {
    let ctx = TestContext::new();
    let rows = read_rows(ctx.seeds_dir(), SeedFile::AdEvents);
    let clicks = rows.iter().filter(|r| &r[12] == "1").count();

    let report = click_through(&ctx.reader()).expect("Failed to run click-through");
    assert_eq!(report.total_impressions as usize, rows.len());
    assert_eq!(report.clicks as usize, clicks);

    let ctr = report.ctr_pct.expect("ctr should be present");
    assert!((0.0..=100.0).contains(&ctr));
    assert!((ctr - pct(clicks, rows.len())).abs() <= 0.005 + 1e-9);
}

#[test]
fn test_date_range_within_generated_days() {
    let ctx = TestContext::new();
    let rows = read_rows(ctx.seeds_dir(), SeedFile::AdEvents);
    let timestamps: Vec<NaiveDateTime> = rows
        .iter()
        .map(|r| NaiveDateTime::parse_from_str(&r[0], TIMESTAMP_FORMAT).unwrap())
        .collect();
    let users: HashSet<&str> = rows.iter().map(|r| &r[2]).collect();

    let report = date_range(&ctx.reader()).expect("Failed to run date range");
    let first = report.first_event.expect("first event");
    let last = report.last_event.expect("last event");

    assert_eq!(Some(first), timestamps.iter().min().copied());
    assert_eq!(Some(last), timestamps.iter().max().copied());
    assert!(first.date() >= ctx.config.start_date);
    assert!(last.date() <= ctx.config.end_date());

    assert_eq!(report.unique_users as usize, users.len());
    assert!(report.unique_users <= i64::from(ctx.config.num_users));
}

#[test]
fn test_report_output() {
    let ctx = TestContext::new();
    let report = run_all(&ctx.reader()).expect("Failed to run reports");

    let text = report.to_string();
    for heading in [
        "=== Row Counts ===",
        "=== Viewability Rate ===",
        "=== Click-Through Rate ===",
        "=== Date Range ===",
    ] {
        assert!(text.contains(heading), "missing heading {}", heading);
    }

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["row_counts"][0]["table_name"], "ad_events");
    assert_eq!(
        json["click_through"]["total_impressions"],
        serde_json::json!(ctx.summary.impressions)
    );
    assert!(json["date_range"]["first_event"].is_string());
}

#[test]
fn test_reload_keeps_counts() {
    let ctx = TestContext::new();
    let writer = ctx.writer();
    let reloaded = load_seeds(&writer, ctx.seeds_dir()).expect("Failed to reload");

    assert_eq!(reloaded, ctx.loaded);
    let counts = row_counts(&writer).unwrap();
    assert_eq!(counts[0].rows as u64, ctx.summary.impressions);
}

#[test]
fn test_reports_on_empty_tables() {
    let ctx = TestContext::new();
    {
        let writer = ctx.writer();
        writer
            .inner()
            .execute_batch("DELETE FROM main.ad_events;")
            .unwrap();
    }

    let client = ctx.reader();
    let view = viewability(&client).unwrap();
    assert_eq!(view.total_impressions, 0);
    assert_eq!(view.viewable_impressions, 0);
    assert_eq!(view.viewability_rate_pct, None);

    let range = date_range(&client).unwrap();
    assert_eq!(range.first_event, None);
    assert_eq!(range.unique_users, 0);
}

#[test]
fn test_read_only_client_rejects_writes() {
    let ctx = TestContext::new();
    let client = ctx.reader();
    let result = client.inner().execute_batch("DELETE FROM main.ad_events;");
    assert!(result.is_err());
}
