//! End-to-end tests for catalog inspection on a loaded database.

use duckdb_client::{
    inspect,
    inspect::{list_schemas, list_tables, search_tables},
    DEFAULT_SEARCH_PATTERN,
};
use integration_tests::setup::TestContext;

#[test]
fn test_lists_loaded_tables() {
    let ctx = TestContext::new();
    let tables = list_tables(&ctx.reader()).expect("Failed to list tables");

    let main: Vec<_> = tables
        .iter()
        .filter(|t| t.table_schema == "main")
        .map(|t| t.table_name.as_str())
        .collect();
    assert_eq!(main, ["ad_events", "content_catalog", "conversions"]);
}

#[test]
fn test_lists_extra_schema() {
    let ctx = TestContext::new();
    ctx.writer()
        .inner()
        .execute_batch("CREATE SCHEMA marts; CREATE TABLE marts.fct_ad_daily (day DATE);")
        .unwrap();

    let client = ctx.reader();
    let schemas = list_schemas(&client).unwrap();
    assert!(schemas.iter().any(|s| s.schema_name == "marts"));

    let matches = search_tables(&client, DEFAULT_SEARCH_PATTERN).unwrap();
    let names: Vec<_> = matches
        .iter()
        .map(|t| format!("{}.{}", t.table_schema, t.table_name))
        .collect();
    assert_eq!(names, ["main.ad_events", "marts.fct_ad_daily"]);
}

#[test]
fn test_inspection_report() {
    let ctx = TestContext::new();
    let inspection = inspect(&ctx.reader(), "conv%").expect("Failed to inspect");

    assert_eq!(inspection.pattern, "conv%");
    assert_eq!(inspection.matches.len(), 1);
    assert_eq!(inspection.matches[0].table_name, "conversions");

    let text = inspection.to_string();
    assert!(text.contains("=== Searching for 'conv%' ==="));

    let json = serde_json::to_value(&inspection).unwrap();
    assert!(json["tables"].as_array().unwrap().len() >= 3);
}
