//! End-to-end tests for seed generation.
//!
//! Generates a small dataset into a temp dir and checks the CSV files the
//! loader and reports depend on.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use generator::generate_seeds;
use integration_tests::fixtures::{read_header, read_rows, small_config};
use lakehouse_core::{SeedFile, TIMESTAMP_FORMAT, USER_HASH_LEN};

#[test]
fn test_seed_files_have_expected_headers() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());
    generate_seeds(&config).expect("Failed to generate seeds");

    assert_eq!(
        read_header(dir.path(), SeedFile::ContentCatalog),
        ["content_id", "title", "genre", "rating", "duration_s", "release_year"]
    );
    assert_eq!(
        read_header(dir.path(), SeedFile::AdEvents),
        [
            "event_ts",
            "event_type",
            "user_id_hash",
            "impression_id",
            "campaign_id",
            "content_id",
            "placement",
            "device",
            "geo",
            "view_time_ms",
            "pct_quartile",
            "audible",
            "clicked",
        ]
    );
    assert_eq!(
        read_header(dir.path(), SeedFile::Conversions),
        ["conversion_id", "event_ts", "user_id_hash", "campaign_id", "conversion_type", "revenue"]
    );
}

#[test]
fn test_summary_matches_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());
    let summary = generate_seeds(&config).expect("Failed to generate seeds");

    assert_eq!(summary.content_items, 12);
    assert_eq!(
        read_rows(dir.path(), SeedFile::ContentCatalog).len() as u64,
        summary.content_items
    );
    assert_eq!(
        read_rows(dir.path(), SeedFile::AdEvents).len() as u64,
        summary.impressions
    );
    assert_eq!(
        read_rows(dir.path(), SeedFile::Conversions).len() as u64,
        summary.conversions
    );

    // 5 weekdays (Jan 1-3, 6-7) and 2 weekend days (Jan 4-5)
    assert!((5 * 80 + 2 * 100..=5 * 120 + 2 * 150).contains(&summary.impressions));
    assert!((7 * 5..=7 * 10).contains(&summary.conversions));
    assert_eq!(summary.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(summary.end_date, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());

    let text = summary.to_string();
    assert!(text.contains("Data generation complete!"));
    assert!(text.contains("Date range: 2025-01-01 to 2025-01-07"));
}

#[test]
fn test_impressions_are_sequential_and_in_range() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());
    generate_seeds(&config).expect("Failed to generate seeds");

    let rows = read_rows(dir.path(), SeedFile::AdEvents);
    let first_day = config.start_date.and_hms_opt(0, 0, 0).unwrap();
    let after_last = config.end_date().succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap();
    let mut previous_ts = first_day;

    for (i, row) in rows.iter().enumerate() {
        assert_eq!(&row[1], "impression");
        assert_eq!(row[3].to_string(), format!("imp_{:010}", i + 1));

        let ts = NaiveDateTime::parse_from_str(&row[0], TIMESTAMP_FORMAT).unwrap();
        assert!(ts >= first_day && ts < after_last, "timestamp {} out of range", ts);
        // Days are written in order; times within a day are not
        assert!(ts.date() >= previous_ts.date());
        previous_ts = ts;

        assert_eq!(row[2].len(), USER_HASH_LEN);
        assert!(row[2].chars().all(|c| c.is_ascii_hexdigit()));

        let campaign: u32 = row[4].trim_start_matches("CPG_").parse().unwrap();
        assert!((1..=config.num_campaigns).contains(&campaign));
        let content: u32 = row[5].trim_start_matches("content_").parse().unwrap();
        assert!((1..=config.num_content_items).contains(&content));

        let view_time: u32 = row[9].parse().unwrap();
        assert!(view_time <= 15000);
        assert!(matches!(&row[10], "0" | "25" | "50" | "75" | "100"));
        assert!(matches!(&row[11], "0" | "1"));
        assert!(matches!(&row[12], "0" | "1"));
    }
}

#[test]
fn test_user_hashes_come_from_the_pool() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());
    generate_seeds(&config).expect("Failed to generate seeds");

    let pool = lakehouse_core::UserPool::new(config.num_users, &config.user_salt);
    let known: HashSet<&str> = (1..=config.num_users).filter_map(|n| pool.get(n)).collect();

    // user_id_hash is the third column in both files
    for seed in [SeedFile::AdEvents, SeedFile::Conversions] {
        for row in read_rows(dir.path(), seed) {
            assert!(known.contains(&row[2]), "unknown user hash {}", &row[2]);
        }
    }
}

#[test]
fn test_conversion_revenue_by_type() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path());
    generate_seeds(&config).expect("Failed to generate seeds");

    for (i, row) in read_rows(dir.path(), SeedFile::Conversions).iter().enumerate() {
        assert_eq!(row[0].to_string(), format!("conv_{:08}", i + 1));
        let revenue: f64 = row[5].parse().unwrap();
        let decimals = row[5].split('.').nth(1).map(str::len);
        assert_eq!(decimals, Some(2), "revenue {} not written with cents", &row[5]);

        match &row[4] {
            "sign_up" => assert_eq!(&row[5], "0.00"),
            "subscription" => assert!(matches!(&row[5], "9.99" | "14.99" | "19.99")),
            "purchase" => assert!((9.99..=149.99).contains(&revenue)),
            other => panic!("unexpected conversion type {}", other),
        }
    }
}

#[test]
fn test_same_seed_same_bytes() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    generate_seeds(&small_config(a.path())).unwrap();
    generate_seeds(&small_config(b.path())).unwrap();

    for seed in SeedFile::ALL {
        let left = std::fs::read(seed.path_in(a.path())).unwrap();
        let right = std::fs::read(seed.path_in(b.path())).unwrap();
        assert_eq!(left, right, "{} differs between runs", seed.file_name());
    }
}

#[test]
fn test_different_seed_different_events() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    generate_seeds(&small_config(a.path())).unwrap();
    let mut other = small_config(b.path());
    other.seed += 1;
    generate_seeds(&other).unwrap();

    let left = std::fs::read(SeedFile::AdEvents.path_in(a.path())).unwrap();
    let right = std::fs::read(SeedFile::AdEvents.path_in(b.path())).unwrap();
    assert_ne!(left, right);
}
