//! Tracing subscriber initialization.
//!
//! Filtering comes from `RUST_LOG` (default `info`); the output format from
//! `LOG_FORMAT` (`json`, the default, or `pretty` for local development).

use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT: &str = "LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT).ok().as_deref())
    }

    /// Unknown values fall back to JSON.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Install the global subscriber.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    let _ = match format {
        LogFormat::Json => builder.json().with_target(false).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
