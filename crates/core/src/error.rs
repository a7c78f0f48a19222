//! Unified error types for the ads lakehouse.
//!
//! Error codes:
//! - CONFIG_001: Invalid configuration
//! - IO_001: Filesystem errors
//! - CSV_001: CSV serialization errors
//! - DB_001-003: Database errors

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Database error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorCode {
    /// DB_001: Query failed
    QueryFailed,
    /// DB_002: Failed to load seed files
    LoadFailed,
    /// DB_003: Failed to open the database file
    OpenFailed,
}

impl DbErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::QueryFailed => "DB_001",
            Self::LoadFailed => "DB_002",
            Self::OpenFailed => "DB_003",
        }
    }
}

/// Unified error type for the ads lakehouse.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected by validation.
    #[error("[CONFIG_001] {0}")]
    Config(String),

    /// Database error with code.
    #[error("[{code}] {message}")]
    Database { code: &'static str, message: String },

    #[error("[IO_001] {0}")]
    Io(#[from] std::io::Error),

    #[error("[CSV_001] {0}")]
    Csv(#[from] csv::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a database error.
    pub fn database(code: DbErrorCode, msg: impl Into<String>) -> Self {
        Self::Database {
            code: code.code(),
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) => Some("CONFIG_001"),
            Self::Database { code, .. } => Some(code),
            Self::Io(_) => Some("IO_001"),
            Self::Csv(_) => Some("CSV_001"),
            _ => None,
        }
    }
}
