//! DuckDB configuration.

use std::path::PathBuf;

use lakehouse_core::{Error, Result};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Path DuckDB treats as a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// DuckDB client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DuckDbConfig {
    /// Database file path
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Schema holding the lakehouse tables
    #[serde(default = "default_schema")]
    #[validate(custom(function = "validate_identifier"))]
    pub schema: String,
    /// Open without write access
    #[serde(default)]
    pub read_only: bool,
    /// Directory the loader reads seed CSVs from
    #[serde(default = "default_seeds_dir")]
    pub seeds_dir: PathBuf,
}

fn default_path() -> PathBuf {
    PathBuf::from("dev.duckdb")
}

fn default_schema() -> String {
    "main".to_string()
}

fn default_seeds_dir() -> PathBuf {
    PathBuf::from("seeds")
}

/// Schema names are spliced into SQL text, so only plain identifiers pass.
fn validate_identifier(name: &str) -> std::result::Result<(), ValidationError> {
    let mut chars = name.chars();
    let head_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Ok(());
    }
    let mut err = ValidationError::new("invalid_identifier");
    err.message = Some(format!("'{}' is not a plain SQL identifier", name).into());
    Err(err)
}

impl Default for DuckDbConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            schema: default_schema(),
            read_only: false,
            seeds_dir: default_seeds_dir(),
        }
    }
}

impl DuckDbConfig {
    /// Configuration for a throwaway in-memory database.
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from(IN_MEMORY_PATH),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY_PATH
    }

    /// Runs field validation, mapping failures to `CONFIG_001`.
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| Error::config(format!("duckdb: {}", e)))
    }
}
