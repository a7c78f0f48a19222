//! Structured logging for the ads lakehouse.
//!
//! Logs go to stderr so report output on stdout stays clean.

pub mod tracing_setup;

pub use tracing_setup::*;
