//! Layered application configuration.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. the TOML config file (optional)
//! 3. `LAKEHOUSE__*` environment variables, e.g. `LAKEHOUSE__GENERATOR__SEED=7`
//! 4. `LAKEHOUSE_DB` for the database path
//!
//! Command-line flags are applied on top by the caller.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use duckdb_client::DuckDbConfig;
use lakehouse_core::GeneratorConfig;

/// Prefix of the nested environment overrides.
pub const ENV_PREFIX: &str = "LAKEHOUSE";

/// Short override for the database path.
pub const DB_PATH_VAR: &str = "LAKEHOUSE_DB";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub duckdb: DuckDbConfig,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            generator: GeneratorConfig::default(),
            duckdb: DuckDbConfig::default(),
        }
    }
}

/// Load configuration from `file` and the process environment.
pub fn load_config(file: &str) -> Result<Config> {
    load_config_from(file, std::env::vars().collect())
}

/// Load configuration from `file` and the given environment variables.
pub fn load_config_from(file: &str, env: config::Map<String, String>) -> Result<Config> {
    let db_path = env.get(DB_PATH_VAR).cloned();

    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name(file)
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(Some(env)),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    if let Some(path) = db_path {
        config.duckdb.path = PathBuf::from(path);
    }

    Ok(config)
}
