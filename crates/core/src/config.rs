//! Generator configuration.

use std::path::PathBuf;

use chrono::{Days, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{Error, Result};
use crate::hashing::DEFAULT_USER_SALT;

/// Inclusive integer range used for per-day counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, n: u32) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

fn validate_count_range(range: &CountRange) -> std::result::Result<(), ValidationError> {
    if range.min > range.max {
        let mut err = ValidationError::new("inverted_range");
        err.message = Some(format!("min {} exceeds max {}", range.min, range.max).into());
        return Err(err);
    }
    Ok(())
}

/// Synthetic data generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeneratorConfig {
    /// RNG seed
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// First simulated day
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// Simulated days, at most a century
    #[serde(default = "default_num_days")]
    #[validate(range(min = 1, max = 36_500))]
    pub num_days: u32,
    #[serde(default = "default_num_users")]
    #[validate(range(min = 1))]
    pub num_users: u32,
    /// Campaign ids are two digits wide
    #[serde(default = "default_num_campaigns")]
    #[validate(range(min = 1, max = 99))]
    pub num_campaigns: u32,
    /// Content ids are four digits wide
    #[serde(default = "default_num_content_items")]
    #[validate(range(min = 1, max = 9999))]
    pub num_content_items: u32,
    /// Salt mixed into user id hashes
    #[serde(default = "default_user_salt")]
    #[validate(length(min = 1))]
    pub user_salt: String,
    /// Directory the seed CSVs are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Impressions per Monday..Friday
    #[serde(default = "default_weekday_events")]
    #[validate(custom(function = "validate_count_range"))]
    pub weekday_events: CountRange,
    /// Impressions per Saturday/Sunday
    #[serde(default = "default_weekend_events")]
    #[validate(custom(function = "validate_count_range"))]
    pub weekend_events: CountRange,
    #[serde(default = "default_daily_conversions")]
    #[validate(custom(function = "validate_count_range"))]
    pub daily_conversions: CountRange,
    #[serde(default = "default_viewable_probability")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub viewable_probability: f64,
    #[serde(default = "default_audible_probability")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub audible_probability: f64,
    #[serde(default = "default_click_probability")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub click_probability: f64,
}

fn default_seed() -> u64 {
    42
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("2025-01-01 is a valid date")
}

fn default_num_days() -> u32 {
    90
}

fn default_num_users() -> u32 {
    5000
}

fn default_num_campaigns() -> u32 {
    8
}

fn default_num_content_items() -> u32 {
    50
}

fn default_user_salt() -> String {
    DEFAULT_USER_SALT.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("seeds")
}

fn default_weekday_events() -> CountRange {
    CountRange::new(8000, 12000)
}

fn default_weekend_events() -> CountRange {
    CountRange::new(10000, 15000)
}

fn default_daily_conversions() -> CountRange {
    CountRange::new(80, 150)
}

fn default_viewable_probability() -> f64 {
    0.7
}

fn default_audible_probability() -> f64 {
    0.85
}

fn default_click_probability() -> f64 {
    0.02
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            start_date: default_start_date(),
            num_days: default_num_days(),
            num_users: default_num_users(),
            num_campaigns: default_num_campaigns(),
            num_content_items: default_num_content_items(),
            user_salt: default_user_salt(),
            output_dir: default_output_dir(),
            weekday_events: default_weekday_events(),
            weekend_events: default_weekend_events(),
            daily_conversions: default_daily_conversions(),
            viewable_probability: default_viewable_probability(),
            audible_probability: default_audible_probability(),
            click_probability: default_click_probability(),
        }
    }
}

impl GeneratorConfig {
    /// Runs field validation, mapping failures to `CONFIG_001`.
    ///
    /// A config that passes can call [`end_date`](Self::end_date) and
    /// [`day`](Self::day) for every offset below `num_days`.
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| Error::config(format!("generator: {}", e)))?;

        if self
            .start_date
            .checked_add_days(Days::new(u64::from(self.num_days)))
            .is_none()
        {
            return Err(Error::config(format!(
                "generator: {} days from {} runs past the last representable date",
                self.num_days, self.start_date
            )));
        }
        Ok(())
    }

    /// Last simulated day (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(i64::from(self.num_days.saturating_sub(1)))
    }

    /// Date of the zero-based day offset.
    pub fn day(&self, offset: u32) -> NaiveDate {
        self.start_date + Duration::days(i64::from(offset))
    }
}
