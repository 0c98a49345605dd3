//! Adapter configuration.
//!
//! The host process decides where the API key comes from; [`AlphaVantageConfig::from_env`]
//! covers the common case of reading it from the environment.

use std::fmt;
use std::time::Duration;

use crate::client::RetryPolicy;
use crate::errors::MarketDataError;

/// Production endpoint. All functions are served from this single path.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "ALPHA_VANTAGE_BASE_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Slightly above one second so bursts stay under the 1 request/second ceiling.
const DEFAULT_PACING_INTERVAL: Duration = Duration::from_millis(1100);

/// How far back a `compact` series reaches (about 100 trading days).
const DEFAULT_COMPACT_WINDOW_DAYS: i64 = 100;

/// Largest window [`AlphaVantageConfig::with_compact_window_days`] accepts.
pub const MAX_COMPACT_WINDOW_DAYS: i64 = 36_500;

/// Upstream `outputsize` parameter for daily series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputSize {
    /// Latest ~100 data points. Available on the free tier.
    #[default]
    Compact,
    /// Full history. Premium for equities.
    Full,
}

impl OutputSize {
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Full => "full",
        }
    }
}

/// Configuration for one adapter instance.
#[derive(Clone)]
pub struct AlphaVantageConfig {
    /// Endpoint URL, without query string
    pub base_url: String,
    /// Credential attached to every request as `apikey`
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Minimum spacing between outbound requests
    pub pacing_interval: Duration,
    /// Backoff policy for transient transport failures
    pub retry: RetryPolicy,
    /// `outputsize` for daily series
    pub output_size: OutputSize,
    /// Range starts older than this many days trigger a warning
    pub compact_window_days: i64,
}

impl AlphaVantageConfig {
    /// Create a configuration with production defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            pacing_interval: DEFAULT_PACING_INTERVAL,
            retry: RetryPolicy::default(),
            output_size: OutputSize::default(),
            compact_window_days: DEFAULT_COMPACT_WINDOW_DAYS,
        }
    }

    /// Read the API key and optional base URL from the environment.
    pub fn from_env() -> Result<Self, MarketDataError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| MarketDataError::InvalidArgument(format!("{} is not set", API_KEY_ENV)))?;

        let config = Self::new(api_key);
        Ok(match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
            _ => config,
        })
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the pacing interval.
    pub fn with_pacing_interval(mut self, interval: Duration) -> Self {
        self.pacing_interval = interval;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the series output size.
    pub fn with_output_size(mut self, output_size: OutputSize) -> Self {
        self.output_size = output_size;
        self
    }

    /// Set the compact-window warning threshold, clamped to
    /// `0..=MAX_COMPACT_WINDOW_DAYS`.
    pub fn with_compact_window_days(mut self, days: i64) -> Self {
        self.compact_window_days = days.clamp(0, MAX_COMPACT_WINDOW_DAYS);
        self
    }
}

impl fmt::Debug for AlphaVantageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaVantageConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("timeout", &self.timeout)
            .field("pacing_interval", &self.pacing_interval)
            .field("retry", &self.retry)
            .field("output_size", &self.output_size)
            .field("compact_window_days", &self.compact_window_days)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AlphaVantageConfig::new("demo");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.pacing_interval, Duration::from_millis(1100));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.output_size.as_param(), "compact");
        assert_eq!(config.compact_window_days, 100);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = AlphaVantageConfig::new("SUPERSECRETKEY");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("SUPERSECRETKEY"));
        assert!(rendered.contains("api_key: \"***\""));
    }

    #[test]
    fn test_builder_overrides() {
        let config = AlphaVantageConfig::new("demo")
            .with_base_url("http://localhost:8080/query")
            .with_pacing_interval(Duration::from_millis(5))
            .with_output_size(OutputSize::Full);

        assert_eq!(config.base_url, "http://localhost:8080/query");
        assert_eq!(config.pacing_interval, Duration::from_millis(5));
        assert_eq!(config.output_size, OutputSize::Full);
    }

    #[test]
    fn test_compact_window_days_is_clamped() {
        let config = AlphaVantageConfig::new("demo").with_compact_window_days(30);
        assert_eq!(config.compact_window_days, 30);

        let config = AlphaVantageConfig::new("demo").with_compact_window_days(1_000_000_000);
        assert_eq!(config.compact_window_days, MAX_COMPACT_WINDOW_DAYS);

        let config = AlphaVantageConfig::new("demo").with_compact_window_days(-7);
        assert_eq!(config.compact_window_days, 0);
    }
}
