//! DuckDB client for the ads lakehouse.

pub mod client;
pub mod config;
pub mod health;
pub mod inspect;
pub mod load;
pub mod query;
pub mod schema;
pub mod table;

pub use client::*;
pub use config::*;
pub use inspect::{inspect, Inspection, DEFAULT_SEARCH_PATTERN};
pub use load::{load_seeds, LoadedTable};
pub use query::*;
