//! Tracing setup for structured logging.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Log level filter (e.g., "info", "duckdb_client=debug")
    pub filter: String,
    /// Whether to output JSON format
    pub json: bool,
    /// Whether to include span events
    pub span_events: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
            span_events: false,
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `RUST_LOG`, `LOG_JSON` and `LOG_SPANS`, falling back to `default_filter`.
    pub fn from_env(default_filter: &str) -> Self {
        let flag = |name: &str| std::env::var(name).map(|v| parse_flag(&v)).unwrap_or(false);
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
        Self::new()
            .with_filter(filter)
            .with_json(flag("LOG_JSON"))
            .with_span_events(flag("LOG_SPANS"))
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_span_events(mut self, span_events: bool) -> Self {
        self.span_events = span_events;
        self
    }
}

fn parse_flag(raw: &str) -> bool {
    raw == "1" || raw.eq_ignore_ascii_case("true")
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    if config.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_span_events(span_events)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(span_events)
            .with_target(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    tracing::debug!(filter = %config.filter, json = config.json, "Tracing initialized");
    Ok(())
}

/// Initialize tracing from environment variables.
pub fn init_tracing_from_env(default_filter: &str) -> Result<(), TryInitError> {
    init_tracing(&TracingConfig::from_env(default_filter))
}
