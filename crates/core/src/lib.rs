//! Core record types, hashing, and configuration for the ads lakehouse.

pub mod config;
pub mod error;
pub mod hashing;
pub mod records;
pub mod seeds;

pub use config::*;
pub use error::{DbErrorCode, Error, Result};
pub use hashing::*;
pub use records::*;
pub use seeds::SeedFile;
