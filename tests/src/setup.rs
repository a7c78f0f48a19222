//! Common test setup functions.

use std::path::PathBuf;

use duckdb_client::{load_seeds, DuckDbClient, DuckDbConfig, LoadedTable};
use generator::{generate_seeds, GenerationSummary};
use lakehouse_core::GeneratorConfig;
use tempfile::TempDir;

use crate::fixtures::small_config;

/// Generated seeds loaded into a database file, all inside a temp dir.
pub struct TestContext {
    pub dir: TempDir,
    pub config: GeneratorConfig,
    pub summary: GenerationSummary,
    pub loaded: Vec<LoadedTable>,
    pub db_path: PathBuf,
}

impl TestContext {
    /// Generates the small fixture dataset and loads it.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Same as [`TestContext::new`] with a chance to adjust the config first.
    pub fn with_config(adjust: impl FnOnce(&mut GeneratorConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = small_config(&dir.path().join("seeds"));
        adjust(&mut config);

        let summary = generate_seeds(&config).expect("Failed to generate seeds");

        let db_path = dir.path().join("test.duckdb");
        let client = DuckDbClient::open(DuckDbConfig::default().with_path(&db_path))
            .expect("Failed to open database");
        let loaded = load_seeds(&client, &config.output_dir).expect("Failed to load seeds");
        drop(client);

        Self {
            dir,
            config,
            summary,
            loaded,
            db_path,
        }
    }

    pub fn seeds_dir(&self) -> &std::path::Path {
        &self.config.output_dir
    }

    /// Opens the loaded database read-only, the way reports do.
    pub fn reader(&self) -> DuckDbClient {
        DuckDbClient::open(
            DuckDbConfig::default()
                .with_path(&self.db_path)
                .with_read_only(true),
        )
        .expect("Failed to open database read-only")
    }

    /// Opens the loaded database for writing.
    pub fn writer(&self) -> DuckDbClient {
        DuckDbClient::open(DuckDbConfig::default().with_path(&self.db_path))
            .expect("Failed to open database")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
