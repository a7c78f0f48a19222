//! Per-record sampling policy.
//!
//! Every draw comes from one ChaCha8 stream seeded from the config, so a
//! given config always yields the same records in the same order.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use lakehouse_core::{
    campaign_id, content_id, conversion_id, impression_id, AdEvent, ContentItem, Conversion,
    ConversionType, CountRange, Device, EventType, GeneratorConfig, Geo, Genre, Placement,
    Rating, UserPool, Vocabulary, PURCHASE_REVENUE_MAX, PURCHASE_REVENUE_MIN, QUARTILES,
    SUBSCRIPTION_PRICES,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// View time bounds (ms) for viewable impressions.
pub const VIEWABLE_TIME_MS: (u32, u32) = (2000, 15000);

/// View time bounds (ms) for impressions that never became viewable.
pub const NON_VIEWABLE_TIME_MS: (u32, u32) = (0, 1500);

/// Content duration bounds in seconds (30 min to 2 hours).
pub const DURATION_S: (u32, u32) = (1800, 7200);

pub const RELEASE_YEARS: (u16, u16) = (2020, 2025);

/// Stateful sampler holding the RNG and the running id counters.
pub struct Sampler {
    rng: ChaCha8Rng,
    config: GeneratorConfig,
    users: UserPool,
    impressions: u64,
    conversions: u64,
}

impl Sampler {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            users: UserPool::new(config.num_users, &config.user_salt),
            config: config.clone(),
            impressions: 0,
            conversions: 0,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Impressions emitted so far.
    pub fn impressions(&self) -> u64 {
        self.impressions
    }

    /// Conversions emitted so far.
    pub fn conversions(&self) -> u64 {
        self.conversions
    }

    /// Catalog entry for the 1-based index `n`.
    pub fn content_item(&mut self, n: u32) -> ContentItem {
        ContentItem {
            content_id: content_id(n),
            title: format!("Title_{}", n),
            genre: self.pick::<Genre>(),
            rating: self.pick::<Rating>(),
            duration_s: self.rng.gen_range(DURATION_S.0..=DURATION_S.1),
            release_year: self.rng.gen_range(RELEASE_YEARS.0..=RELEASE_YEARS.1),
        }
    }

    /// Number of impressions to emit on `date`. Weekends draw from the busier range.
    pub fn daily_impressions(&mut self, date: NaiveDate) -> u32 {
        let range = if is_weekday(date) {
            self.config.weekday_events
        } else {
            self.config.weekend_events
        };
        self.count_in(range)
    }

    pub fn daily_conversions(&mut self) -> u32 {
        self.count_in(self.config.daily_conversions)
    }

    /// Next impression on `date`.
    pub fn impression(&mut self, date: NaiveDate) -> AdEvent {
        let user_id_hash = self.user_hash();
        let campaign_id = campaign_id(self.rng.gen_range(1..=self.config.num_campaigns));
        let content_id = content_id(self.rng.gen_range(1..=self.config.num_content_items));
        let placement = self.pick::<Placement>();
        let device = self.pick::<Device>();
        let geo = self.pick::<Geo>();

        self.impressions += 1;
        let impression_id = impression_id(self.impressions);
        let event_ts = self.timestamp(date);

        let viewed = self.rng.gen_bool(self.config.viewable_probability);
        let view_time_ms = if viewed {
            self.rng.gen_range(VIEWABLE_TIME_MS.0..=VIEWABLE_TIME_MS.1)
        } else {
            self.rng.gen_range(NON_VIEWABLE_TIME_MS.0..=NON_VIEWABLE_TIME_MS.1)
        };
        let pct_quartile = if viewed {
            QUARTILES[self.rng.gen_range(0..QUARTILES.len())]
        } else {
            0
        };
        let audible = self.rng.gen_bool(self.config.audible_probability);
        let clicked = self.rng.gen_bool(self.config.click_probability);

        AdEvent {
            event_ts,
            event_type: EventType::Impression,
            user_id_hash,
            impression_id,
            campaign_id,
            content_id,
            placement,
            device,
            geo,
            view_time_ms,
            pct_quartile,
            audible,
            clicked,
        }
    }

    /// Next conversion on `date`.
    pub fn conversion(&mut self, date: NaiveDate) -> Conversion {
        self.conversions += 1;
        let conversion_id = conversion_id(self.conversions);
        let user_id_hash = self.user_hash();
        let campaign_id = campaign_id(self.rng.gen_range(1..=self.config.num_campaigns));
        let conversion_type = self.pick::<ConversionType>();
        let revenue = self.revenue(conversion_type);
        let event_ts = self.timestamp(date);

        Conversion {
            conversion_id,
            event_ts,
            user_id_hash,
            campaign_id,
            conversion_type,
            revenue,
        }
    }

    fn revenue(&mut self, kind: ConversionType) -> f64 {
        match kind {
            ConversionType::SignUp => 0.0,
            ConversionType::Purchase => {
                let raw = self
                    .rng
                    .gen_range(PURCHASE_REVENUE_MIN..=PURCHASE_REVENUE_MAX);
                ((raw * 100.0).round() / 100.0).clamp(PURCHASE_REVENUE_MIN, PURCHASE_REVENUE_MAX)
            }
            ConversionType::Subscription => {
                SUBSCRIPTION_PRICES[self.rng.gen_range(0..SUBSCRIPTION_PRICES.len())]
            }
        }
    }

    /// `date` plus a uniform hour, minute and second.
    fn timestamp(&mut self, date: NaiveDate) -> NaiveDateTime {
        let offset = Duration::hours(self.rng.gen_range(0..=23))
            + Duration::minutes(self.rng.gen_range(0..=59))
            + Duration::seconds(self.rng.gen_range(0..=59));
        date.and_time(chrono::NaiveTime::MIN) + offset
    }

    fn user_hash(&mut self) -> String {
        let n = self.rng.gen_range(1..=self.config.num_users);
        self.users.get(n).unwrap_or_default().to_string()
    }

    fn count_in(&mut self, range: CountRange) -> u32 {
        self.rng.gen_range(range.min..=range.max)
    }

    fn pick<T: Vocabulary>(&mut self) -> T {
        T::ALL[self.rng.gen_range(0..T::ALL.len())]
    }
}

/// Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    date.weekday().number_from_monday() <= 5
}
