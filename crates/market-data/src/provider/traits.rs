//! Provider trait definitions.
//!
//! Consumers program against these traits; [`AlphaVantageProvider`] is the
//! implementation shipped with this crate.
//!
//! [`AlphaVantageProvider`]: super::alpha_vantage::AlphaVantageProvider

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::{MarketDataError, ProviderOutcome};
use crate::models::{ExchangeRate, Price, SecurityProfile, SecuritySearchResult};

/// Base trait for market data providers.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "ALPHA_VANTAGE".
    ///
    /// Used for logging.
    fn id(&self) -> &'static str;

    /// Whether the upstream currently answers with usable data.
    ///
    /// Failures inside the check are reported as `Ok(false)`, never as `Err`.
    async fn healthy(&self) -> ProviderOutcome<bool>;
}

/// FX rate lookups.
#[async_trait]
pub trait ExchangeRateProvider: MarketDataProvider {
    /// Daily rates for `from`/`to` between `start` and `end`, inclusive,
    /// ordered by date ascending.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `start > end` or a currency is blank.
    async fn fetch_exchange_rates(
        &self,
        from: &str,
        to: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ProviderOutcome<Vec<ExchangeRate>>;

    /// The rate for a single date.
    ///
    /// Runs the range lookup with `start == end == date`. No row for that
    /// date is `EmptyResult`.
    async fn fetch_exchange_rate(
        &self,
        from: &str,
        to: &str,
        date: NaiveDate,
    ) -> ProviderOutcome<ExchangeRate> {
        self.fetch_exchange_rates(from, to, date, date)
            .await?
            .into_iter()
            .next()
            .ok_or(MarketDataError::EmptyResult { date })
    }

    /// The current realtime rate.
    async fn fetch_latest_exchange_rate(&self, from: &str, to: &str)
        -> ProviderOutcome<ExchangeRate>;
}

/// Security prices, metadata and search.
#[async_trait]
pub trait SecurityProvider: MarketDataProvider {
    /// Daily closes for `symbol` between `start` and `end`, inclusive,
    /// ordered by date ascending.
    ///
    /// `exchange_operating_mic` is echoed onto every record.
    async fn fetch_security_prices(
        &self,
        symbol: &str,
        exchange_operating_mic: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ProviderOutcome<Vec<Price>>;

    /// The close for a single date; no row for that date is `EmptyResult`.
    async fn fetch_security_price(
        &self,
        symbol: &str,
        exchange_operating_mic: Option<&str>,
        date: NaiveDate,
    ) -> ProviderOutcome<Price> {
        self.fetch_security_prices(symbol, exchange_operating_mic, date, date)
            .await?
            .into_iter()
            .next()
            .ok_or(MarketDataError::EmptyResult { date })
    }

    /// Metadata for `symbol`.
    async fn fetch_security_info(
        &self,
        symbol: &str,
        exchange_operating_mic: Option<&str>,
    ) -> ProviderOutcome<SecurityProfile>;

    /// Keyword search.
    async fn search_securities(&self, keywords: &str)
        -> ProviderOutcome<Vec<SecuritySearchResult>>;
}
