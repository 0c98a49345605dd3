//! Alpha Vantage market data provider implementation.
//!
//! This module provides market data from the Alpha Vantage API:
//! - FX rates via FX_DAILY and CURRENCY_EXCHANGE_RATE
//! - Equity closes via TIME_SERIES_DAILY, priced in the currency found by
//!   OVERVIEW / SYMBOL_SEARCH
//! - Security metadata via OVERVIEW with a SYMBOL_SEARCH fallback
//! - Keyword search via SYMBOL_SEARCH
//!
//! Note: the free tier allows about one request per second; the client
//! paces every request accordingly.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::client::{AlphaVantageClient, HttpTransport, PROVIDER_ID};
use crate::config::{AlphaVantageConfig, OutputSize};
use crate::errors::{MarketDataError, ProviderOutcome};
use crate::models::{DateRange, ExchangeRate, Price, SecurityProfile, SecuritySearchResult};
use crate::provider::{ExchangeRateProvider, MarketDataProvider, SecurityProvider};
use crate::resolver::resolve_country_code;
use crate::response::{
    check_compact_window, classify, ensure_data, extract_series, parse_date,
    parse_positive_decimal, Classification,
};
use crate::security::{parse_matches, SecurityResolver, BEST_MATCHES_KEY};

/// FX_DAILY series key.
const FX_SERIES_KEY: &str = "Time Series FX (Daily)";

/// TIME_SERIES_DAILY series key.
const EQUITY_SERIES_KEY: &str = "Time Series (Daily)";

/// CURRENCY_EXCHANGE_RATE payload key.
const REALTIME_RATE_KEY: &str = "Realtime Currency Exchange Rate";

/// Row field holding the daily close.
const CLOSE_FIELD: &str = "4. close";

const REALTIME_RATE_FIELD: &str = "5. Exchange Rate";
const REALTIME_REFRESHED_FIELD: &str = "6. Last Refreshed";

/// Pair queried by the health check.
const HEALTH_CHECK_PAIR: (&str, &str) = ("USD", "EUR");

/// Alpha Vantage market data provider.
///
/// Safe to share across tasks; all requests go through one paced client.
pub struct AlphaVantageProvider {
    client: AlphaVantageClient,
    output_size: OutputSize,
    compact_window_days: i64,
}

impl AlphaVantageProvider {
    /// Create a provider talking HTTP through `reqwest`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the configured base URL does not parse.
    pub fn new(config: AlphaVantageConfig) -> Result<Self, MarketDataError> {
        let client = AlphaVantageClient::new(&config)?;
        Ok(Self::from_parts(client, &config))
    }

    /// Create a provider from `ALPHA_VANTAGE_API_KEY` / `ALPHA_VANTAGE_BASE_URL`.
    pub fn from_env() -> Result<Self, MarketDataError> {
        Self::new(AlphaVantageConfig::from_env()?)
    }

    /// Create a provider with a caller-supplied transport.
    pub fn with_transport(
        config: AlphaVantageConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, MarketDataError> {
        let client = AlphaVantageClient::with_transport(&config, transport)?;
        Ok(Self::from_parts(client, &config))
    }

    fn from_parts(client: AlphaVantageClient, config: &AlphaVantageConfig) -> Self {
        info!(
            "{} provider ready ({}, outputsize={})",
            PROVIDER_ID,
            config.base_url,
            config.output_size.as_param()
        );
        Self {
            client,
            output_size: config.output_size,
            compact_window_days: config.compact_window_days,
        }
    }

    /// Uppercased, trimmed currency code; blank is rejected.
    fn currency_code(code: &str) -> Result<String, MarketDataError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(MarketDataError::InvalidArgument(
                "currency code must not be empty".to_string(),
            ));
        }
        Ok(code.to_uppercase())
    }

    fn symbol_arg(symbol: &str) -> Result<&str, MarketDataError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(MarketDataError::InvalidArgument(
                "symbol must not be empty".to_string(),
            ));
        }
        Ok(symbol)
    }

    /// Warn when a compact series cannot cover `start`.
    fn compact_advisory(&self, start: NaiveDate) {
        if self.output_size == OutputSize::Compact {
            check_compact_window(start, Utc::now().date_naive(), self.compact_window_days);
        }
    }

    /// Classify a series reply and return its date-keyed rows.
    fn series_rows<'b>(
        body: &'b Value,
        series_key: &str,
        default_message: &str,
    ) -> Result<&'b Map<String, Value>, MarketDataError> {
        let data = ensure_data(body, Some(series_key), default_message)?;
        data[series_key].as_object().ok_or_else(|| {
            warn!("{}: '{}' is not an object", PROVIDER_ID, series_key);
            MarketDataError::NoData {
                message: format!("'{}' is not a date-keyed object", series_key),
            }
        })
    }

    /// Turn a CURRENCY_EXCHANGE_RATE payload into a record.
    fn parse_realtime_rate(
        payload: &Value,
        from: &str,
        to: &str,
    ) -> Result<ExchangeRate, MarketDataError> {
        let rate = payload
            .get(REALTIME_RATE_FIELD)
            .and_then(parse_positive_decimal)
            .ok_or_else(|| MarketDataError::NoData {
                message: format!("no usable '{}' for {}/{}", REALTIME_RATE_FIELD, from, to),
            })?;

        // "2024-01-15 10:00:01" -> date part
        let date = payload
            .get(REALTIME_REFRESHED_FIELD)
            .and_then(Value::as_str)
            .and_then(|text| text.split_whitespace().next())
            .and_then(parse_date)
            .ok_or_else(|| MarketDataError::NoData {
                message: format!("no usable '{}' for {}/{}", REALTIME_REFRESHED_FIELD, from, to),
            })?;

        Ok(ExchangeRate::new(date, from, to, rate))
    }

    fn search_result(
        symbol: String,
        name: Option<String>,
        region: Option<&str>,
    ) -> SecuritySearchResult {
        let country_code = resolve_country_code(region);
        let name = name.unwrap_or_else(|| symbol.clone());
        SecuritySearchResult::new(symbol, name).with_country_code(country_code)
    }
}

// ============================================================================
// Provider trait implementations
// ============================================================================

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn healthy(&self) -> ProviderOutcome<bool> {
        let (from, to) = HEALTH_CHECK_PAIR;
        debug!("{}: health check ({}/{})", PROVIDER_ID, from, to);

        let body = match self
            .client
            .call(
                "CURRENCY_EXCHANGE_RATE",
                &[("from_currency", from), ("to_currency", to)],
            )
            .await
        {
            Ok(body) => body,
            Err(e) => {
                warn!("{}: health check failed: {}", PROVIDER_ID, e);
                return Ok(false);
            }
        };

        match classify(&body, Some(REALTIME_RATE_KEY), "no realtime rate") {
            Classification::Ok(_) => Ok(true),
            Classification::ProviderError(message) | Classification::Empty(message) => {
                warn!("{}: health check unhealthy: {}", PROVIDER_ID, message);
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl ExchangeRateProvider for AlphaVantageProvider {
    async fn fetch_exchange_rates(
        &self,
        from: &str,
        to: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ProviderOutcome<Vec<ExchangeRate>> {
        let from = Self::currency_code(from)?;
        let to = Self::currency_code(to)?;
        let range = DateRange::new(start, end)?;
        debug!(
            "{}: fetching {}/{} rates for {}..={}",
            PROVIDER_ID, from, to, start, end
        );

        self.compact_advisory(start);
        let body = self
            .client
            .call(
                "FX_DAILY",
                &[
                    ("from_symbol", from.as_str()),
                    ("to_symbol", to.as_str()),
                    ("outputsize", self.output_size.as_param()),
                ],
            )
            .await
            .inspect_err(|e| warn!("{}: FX_DAILY {}/{} failed: {}", PROVIDER_ID, from, to, e))?;

        let rows = Self::series_rows(&body, FX_SERIES_KEY, "no FX data returned")?;
        Ok(extract_series(rows, CLOSE_FIELD, range, |date, rate| {
            ExchangeRate::new(date, from.as_str(), to.as_str(), rate)
        }))
    }

    async fn fetch_latest_exchange_rate(
        &self,
        from: &str,
        to: &str,
    ) -> ProviderOutcome<ExchangeRate> {
        let from = Self::currency_code(from)?;
        let to = Self::currency_code(to)?;
        debug!("{}: fetching latest {}/{} rate", PROVIDER_ID, from, to);

        let body = self
            .client
            .call(
                "CURRENCY_EXCHANGE_RATE",
                &[("from_currency", from.as_str()), ("to_currency", to.as_str())],
            )
            .await?;

        let data = ensure_data(&body, Some(REALTIME_RATE_KEY), "no realtime rate returned")?;
        Self::parse_realtime_rate(&data[REALTIME_RATE_KEY], &from, &to)
            .inspect_err(|e| warn!("{}: latest {}/{} rate unusable: {}", PROVIDER_ID, from, to, e))
    }
}

#[async_trait]
impl SecurityProvider for AlphaVantageProvider {
    async fn fetch_security_prices(
        &self,
        symbol: &str,
        exchange_operating_mic: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ProviderOutcome<Vec<Price>> {
        let symbol = Self::symbol_arg(symbol)?;
        let range = DateRange::new(start, end)?;
        debug!(
            "{}: fetching {} prices for {}..={}",
            PROVIDER_ID, symbol, start, end
        );

        let currency = SecurityResolver::new(&self.client)
            .price_currency(symbol)
            .await?;

        self.compact_advisory(start);
        let body = self
            .client
            .call(
                "TIME_SERIES_DAILY",
                &[("symbol", symbol), ("outputsize", self.output_size.as_param())],
            )
            .await
            .inspect_err(|e| warn!("{}: TIME_SERIES_DAILY {} failed: {}", PROVIDER_ID, symbol, e))?;

        let rows = Self::series_rows(&body, EQUITY_SERIES_KEY, "no price data returned")?;
        let mic = exchange_operating_mic.map(str::to_string);
        Ok(extract_series(rows, CLOSE_FIELD, range, |date, close| {
            Price::new(symbol, date, close, currency.as_str(), mic.clone())
        }))
    }

    async fn fetch_security_info(
        &self,
        symbol: &str,
        exchange_operating_mic: Option<&str>,
    ) -> ProviderOutcome<SecurityProfile> {
        let symbol = Self::symbol_arg(symbol)?;
        debug!("{}: fetching security info for {}", PROVIDER_ID, symbol);

        let mic = exchange_operating_mic.map(str::to_string);
        SecurityResolver::new(&self.client)
            .resolve_with(symbol, |metadata| metadata.into_profile(mic))
            .await
            .inspect_err(|e| warn!("{}: security info for {} failed: {}", PROVIDER_ID, symbol, e))
    }

    async fn search_securities(
        &self,
        keywords: &str,
    ) -> ProviderOutcome<Vec<SecuritySearchResult>> {
        let keywords = keywords.trim();
        if keywords.is_empty() {
            return Err(MarketDataError::InvalidArgument(
                "search keywords must not be empty".to_string(),
            ));
        }
        debug!("{}: searching '{}'", PROVIDER_ID, keywords);

        let body = self
            .client
            .call("SYMBOL_SEARCH", &[("keywords", keywords)])
            .await?;
        let data = ensure_data(&body, Some(BEST_MATCHES_KEY), "no search results returned")?;

        Ok(parse_matches(&data[BEST_MATCHES_KEY])
            .into_iter()
            .map(|found| Self::search_result(found.symbol, found.name, found.region.as_deref()))
            .collect())
    }
}
