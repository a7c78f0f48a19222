//! Seed files and the tables they populate.

use std::path::{Path, PathBuf};

/// One of the three generated CSV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedFile {
    ContentCatalog,
    AdEvents,
    Conversions,
}

impl SeedFile {
    /// Generation order. The catalog comes first so the RNG stream is stable.
    pub const ALL: [SeedFile; 3] = [Self::ContentCatalog, Self::AdEvents, Self::Conversions];

    /// Table the file loads into (also the file stem).
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::ContentCatalog => "content_catalog",
            Self::AdEvents => "ad_events",
            Self::Conversions => "conversions",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::ContentCatalog => "content_catalog.csv",
            Self::AdEvents => "ad_events.csv",
            Self::Conversions => "conversions.csv",
        }
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}
