//! End-of-run summary.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use lakehouse_core::{GeneratorConfig, SeedFile};
use serde::Serialize;

/// Counts and date span of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub content_items: u64,
    pub impressions: u64,
    pub conversions: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_users: u32,
    pub output_dir: PathBuf,
}

impl GenerationSummary {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            content_items: 0,
            impressions: 0,
            conversions: 0,
            start_date: config.start_date,
            end_date: config.end_date(),
            num_users: config.num_users,
            output_dir: config.output_dir.clone(),
        }
    }

    /// Stores the row count written for a seed file.
    pub fn record(&mut self, seed: SeedFile, rows: u64) {
        match seed {
            SeedFile::ContentCatalog => self.content_items = rows,
            SeedFile::AdEvents => self.impressions = rows,
            SeedFile::Conversions => self.conversions = rows,
        }
    }
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{}", rule)?;
        writeln!(f, "Data generation complete!")?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;
        writeln!(f, "Summary:")?;
        writeln!(f, "  • Content items: {}", group_thousands(self.content_items))?;
        writeln!(f, "  • Ad impressions: {}", group_thousands(self.impressions))?;
        writeln!(f, "  • Conversions: {}", group_thousands(self.conversions))?;
        writeln!(f, "  • Date range: {} to {}", self.start_date, self.end_date)?;
        write!(f, "  • Unique users: ~{}", group_thousands(u64::from(self.num_users)))
    }
}

/// Formats an integer with comma thousands separators (`1,234,567`).
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
