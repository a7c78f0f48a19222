//! Record types written to the seed CSV files.
//!
//! Field order in each struct is the CSV column order.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used in every seed file (`2025-01-01T13:04:59`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Completion quartiles a viewable impression can reach.
pub const QUARTILES: [u8; 5] = [0, 25, 50, 75, 100];

/// Subscription price points.
pub const SUBSCRIPTION_PRICES: [f64; 3] = [9.99, 14.99, 19.99];

/// Purchase revenue bounds (inclusive).
pub const PURCHASE_REVENUE_MIN: f64 = 9.99;
pub const PURCHASE_REVENUE_MAX: f64 = 149.99;

/// Closed set of values a categorical column can take.
pub trait Vocabulary: Copy + Sized + 'static {
    /// Every value, in a stable order.
    const ALL: &'static [Self];

    /// Value as written to CSV.
    fn as_str(&self) -> &'static str;
}

/// Content genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Documentary,
    Thriller,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Vocabulary for Genre {
    const ALL: &'static [Self] = &[
        Self::Action,
        Self::Comedy,
        Self::Drama,
        Self::Documentary,
        Self::Thriller,
        Self::SciFi,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Comedy => "Comedy",
            Self::Drama => "Drama",
            Self::Documentary => "Documentary",
            Self::Thriller => "Thriller",
            Self::SciFi => "Sci-Fi",
        }
    }
}

/// Content audience rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    G,
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "PG-13")]
    Pg13,
    R,
    #[serde(rename = "TV-MA")]
    TvMa,
}

impl Vocabulary for Rating {
    const ALL: &'static [Self] = &[Self::G, Self::Pg, Self::Pg13, Self::R, Self::TvMa];

    fn as_str(&self) -> &'static str {
        match self {
            Self::G => "G",
            Self::Pg => "PG",
            Self::Pg13 => "PG-13",
            Self::R => "R",
            Self::TvMa => "TV-MA",
        }
    }
}

/// Ad slot the impression was served into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    PreRoll,
    MidRoll,
    DisplayBanner,
    SponsoredTile,
}

impl Vocabulary for Placement {
    const ALL: &'static [Self] = &[
        Self::PreRoll,
        Self::MidRoll,
        Self::DisplayBanner,
        Self::SponsoredTile,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::PreRoll => "pre_roll",
            Self::MidRoll => "mid_roll",
            Self::DisplayBanner => "display_banner",
            Self::SponsoredTile => "sponsored_tile",
        }
    }
}

/// Device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Mobile,
    Desktop,
    Tablet,
    Tv,
}

impl Vocabulary for Device {
    const ALL: &'static [Self] = &[Self::Mobile, Self::Desktop, Self::Tablet, Self::Tv];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Tv => "tv",
        }
    }
}

/// Country the impression was served in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Geo {
    Us,
    Ca,
    Uk,
    De,
    Fr,
    Jp,
    Au,
}

impl Vocabulary for Geo {
    const ALL: &'static [Self] = &[
        Self::Us,
        Self::Ca,
        Self::Uk,
        Self::De,
        Self::Fr,
        Self::Jp,
        Self::Au,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Ca => "CA",
            Self::Uk => "UK",
            Self::De => "DE",
            Self::Fr => "FR",
            Self::Jp => "JP",
            Self::Au => "AU",
        }
    }
}

/// Kind of conversion recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionType {
    SignUp,
    Purchase,
    Subscription,
}

impl Vocabulary for ConversionType {
    const ALL: &'static [Self] = &[Self::SignUp, Self::Purchase, Self::Subscription];

    fn as_str(&self) -> &'static str {
        match self {
            Self::SignUp => "sign_up",
            Self::Purchase => "purchase",
            Self::Subscription => "subscription",
        }
    }
}

impl ConversionType {
    /// Checks that a revenue value is possible for this conversion type.
    pub fn revenue_in_range(&self, revenue: f64) -> bool {
        match self {
            Self::SignUp => revenue == 0.0,
            Self::Purchase => (PURCHASE_REVENUE_MIN..=PURCHASE_REVENUE_MAX).contains(&revenue),
            Self::Subscription => SUBSCRIPTION_PRICES
                .iter()
                .any(|p| (p - revenue).abs() < 1e-9),
        }
    }
}

/// Event type column of `ad_events.csv`. Only impressions are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Impression,
}

/// One row of `content_catalog.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub content_id: String,
    pub title: String,
    pub genre: Genre,
    pub rating: Rating,
    pub duration_s: u32,
    pub release_year: u16,
}

/// One row of `ad_events.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdEvent {
    #[serde(with = "timestamp")]
    pub event_ts: NaiveDateTime,
    pub event_type: EventType,
    pub user_id_hash: String,
    pub impression_id: String,
    pub campaign_id: String,
    pub content_id: String,
    pub placement: Placement,
    pub device: Device,
    pub geo: Geo,
    pub view_time_ms: u32,
    pub pct_quartile: u8,
    #[serde(with = "flag")]
    pub audible: bool,
    #[serde(with = "flag")]
    pub clicked: bool,
}

/// One row of `conversions.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub conversion_id: String,
    #[serde(with = "timestamp")]
    pub event_ts: NaiveDateTime,
    pub user_id_hash: String,
    pub campaign_id: String,
    pub conversion_type: ConversionType,
    #[serde(serialize_with = "cents::serialize")]
    pub revenue: f64,
}

/// Formats a 1-based content index (`content_0007`).
pub fn content_id(n: u32) -> String {
    format!("content_{:04}", n)
}

/// Formats a 1-based campaign index (`CPG_03`).
pub fn campaign_id(n: u32) -> String {
    format!("CPG_{:02}", n)
}

/// Formats a 1-based user index (`user_00042`).
pub fn user_id(n: u32) -> String {
    format!("user_{:05}", n)
}

/// Formats a 1-based impression counter (`imp_0000000001`).
pub fn impression_id(n: u64) -> String {
    format!("imp_{:010}", n)
}

/// Formats a 1-based conversion counter (`conv_00000001`).
pub fn conversion_id(n: u64) -> String {
    format!("conv_{:08}", n)
}

mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*v))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match u8::deserialize(d)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(serde::de::Error::custom(format!(
                "expected 0 or 1, got {}",
                other
            ))),
        }
    }
}

mod cents {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("{:.2}", v))
    }
}
