//! Seeded synthetic data generator.
//!
//! Produces the three seed files consumed by the DuckDB loader:
//! - `content_catalog.csv`
//! - `ad_events.csv` (impressions)
//! - `conversions.csv`

pub mod sampling;
pub mod summary;
pub mod writer;

pub use sampling::Sampler;
pub use summary::GenerationSummary;
pub use writer::*;
