//! Security metadata resolution.
//!
//! Company overview first; when the overview comes back blank (unknown to
//! OVERVIEW, typically funds and non-US listings) the symbol is looked up
//! once through keyword search instead.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::client::{AlphaVantageClient, PROVIDER_ID};
use crate::errors::MarketDataError;
use crate::models::{Currency, Mic, SecurityProfile};
use crate::response::{advisory, classify, ensure_data, is_blank_payload, Classification};

/// Currency assumed when neither source names one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Key holding the matches of a SYMBOL_SEARCH reply.
pub const BEST_MATCHES_KEY: &str = "bestMatches";

// ============================================================================
// Response structures
// ============================================================================

/// OVERVIEW reply; only the fields that feed [`SecurityMetadata`].
#[derive(Debug, Default, Deserialize)]
struct CompanyOverview {
    #[serde(rename = "Symbol", default)]
    symbol: Option<String>,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
    #[serde(rename = "AssetType", default)]
    asset_type: Option<String>,
    #[serde(rename = "Currency", default)]
    currency: Option<String>,
    #[serde(rename = "Country", default)]
    country: Option<String>,
}

/// One entry of `bestMatches`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchMatch {
    #[serde(rename = "1. symbol")]
    pub symbol: String,
    #[serde(rename = "2. name", default)]
    pub name: Option<String>,
    #[serde(rename = "3. type", default)]
    pub kind: Option<String>,
    #[serde(rename = "4. region", default)]
    pub region: Option<String>,
    #[serde(rename = "8. currency", default)]
    pub currency: Option<String>,
}

/// Decode `bestMatches`, skipping entries without a symbol.
pub(crate) fn parse_matches(matches: &Value) -> Vec<SearchMatch> {
    let Some(entries) = matches.as_array() else {
        warn!("{}: '{}' is not a list", PROVIDER_ID, BEST_MATCHES_KEY);
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match SearchMatch::deserialize(entry) {
            Ok(found) => Some(found),
            Err(e) => {
                warn!("{}: skipping malformed search match: {}", PROVIDER_ID, e);
                None
            }
        })
        .collect()
}

/// Provider text fields use "" and "None" for missing values.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "None")
}

// ============================================================================
// Metadata
// ============================================================================

/// Which lookup produced the metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataSource {
    Overview,
    SymbolSearch,
}

/// Security metadata from either lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityMetadata {
    pub symbol: String,
    pub name: Option<String>,
    /// Free-text instrument kind (`AssetType` or the match's `3. type`)
    pub kind: Option<String>,
    /// Only set from the overview
    pub description: Option<String>,
    /// Only set from the overview
    pub currency: Option<Currency>,
    /// The search match's `8. currency`, kept apart from `currency`
    pub listing_currency: Option<Currency>,
    /// Free-text region / country
    pub region: Option<String>,
    pub source: MetadataSource,
}

impl SecurityMetadata {
    fn from_overview(requested: &str, overview: CompanyOverview) -> Self {
        Self {
            symbol: present(overview.symbol).unwrap_or_else(|| requested.to_string()),
            name: present(overview.name),
            kind: present(overview.asset_type),
            description: present(overview.description),
            currency: present(overview.currency),
            listing_currency: None,
            region: present(overview.country),
            source: MetadataSource::Overview,
        }
    }

    fn from_search(found: SearchMatch) -> Self {
        Self {
            symbol: found.symbol,
            name: present(found.name),
            kind: present(found.kind),
            description: None,
            currency: None,
            listing_currency: present(found.currency),
            region: present(found.region),
            source: MetadataSource::SymbolSearch,
        }
    }

    /// Currency prices are quoted in: overview currency, else the listing
    /// currency from search, else [`DEFAULT_CURRENCY`].
    pub fn price_currency(&self) -> Currency {
        if let Some(currency) = self.currency.as_ref().or(self.listing_currency.as_ref()) {
            return currency.clone();
        }
        warn!(
            "{}: no currency known for {}, assuming {}",
            PROVIDER_ID, self.symbol, DEFAULT_CURRENCY
        );
        DEFAULT_CURRENCY.to_string()
    }

    /// Profile record; `exchange_operating_mic` is echoed from the caller.
    pub fn into_profile(self, exchange_operating_mic: Option<Mic>) -> SecurityProfile {
        SecurityProfile {
            symbol: self.symbol,
            name: self.name,
            links: None,
            logo_url: None,
            description: self.description,
            kind: self.kind,
            exchange_operating_mic,
            currency: self.currency,
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Runs the overview-then-search strategy against a client.
pub struct SecurityResolver<'a> {
    client: &'a AlphaVantageClient,
}

impl<'a> SecurityResolver<'a> {
    pub fn new(client: &'a AlphaVantageClient) -> Self {
        Self { client }
    }

    /// Resolve metadata for `symbol`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a blank symbol
    /// - `Provider` when either lookup reports an error message
    /// - `NotFound` when the overview is blank and search has no match
    /// - `Transport` from the client
    pub async fn resolve(&self, symbol: &str) -> Result<SecurityMetadata, MarketDataError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(MarketDataError::InvalidArgument(
                "symbol must not be empty".to_string(),
            ));
        }

        let overview = self.client.call("OVERVIEW", &[("symbol", symbol)]).await?;
        ensure_data(&overview, None, "")?;

        if !is_blank_payload(&overview) {
            let parsed = CompanyOverview::deserialize(&overview).unwrap_or_else(|e| {
                warn!("{}: unexpected OVERVIEW shape for {}: {}", PROVIDER_ID, symbol, e);
                CompanyOverview::default()
            });
            debug!("{}: overview found for {}", PROVIDER_ID, symbol);
            return Ok(SecurityMetadata::from_overview(symbol, parsed));
        }

        match advisory(&overview) {
            Some(note) => debug!(
                "{}: overview for {} is empty ({}), falling back to search",
                PROVIDER_ID, symbol, note
            ),
            None => debug!(
                "{}: overview for {} is empty, falling back to search",
                PROVIDER_ID, symbol
            ),
        }

        self.search_fallback(symbol).await
    }

    /// Resolve metadata for `symbol` and hand it to `pick`.
    pub async fn resolve_with<T, F>(&self, symbol: &str, pick: F) -> Result<T, MarketDataError>
    where
        F: FnOnce(SecurityMetadata) -> T,
    {
        self.resolve(symbol).await.map(pick)
    }

    /// Currency prices of `symbol` are quoted in.
    pub async fn price_currency(&self, symbol: &str) -> Result<Currency, MarketDataError> {
        self.resolve_with(symbol, |metadata| metadata.price_currency())
            .await
    }

    async fn search_fallback(&self, symbol: &str) -> Result<SecurityMetadata, MarketDataError> {
        let body = self
            .client
            .call("SYMBOL_SEARCH", &[("keywords", symbol)])
            .await?;

        let matches = match classify(&body, Some(BEST_MATCHES_KEY), "no search results") {
            Classification::Ok(body) => parse_matches(&body[BEST_MATCHES_KEY]),
            Classification::ProviderError(message) => {
                warn!("{}: search for {} failed: {}", PROVIDER_ID, symbol, message);
                return Err(MarketDataError::Provider { message });
            }
            Classification::Empty(message) => {
                warn!("{}: search for {} returned nothing: {}", PROVIDER_ID, symbol, message);
                Vec::new()
            }
        };

        let chosen = pick_match(symbol, matches).ok_or_else(|| {
            warn!("{}: no metadata found for {}", PROVIDER_ID, symbol);
            MarketDataError::NotFound {
                symbol: symbol.to_string(),
            }
        })?;

        debug!(
            "{}: resolved {} through search as {}",
            PROVIDER_ID, symbol, chosen.symbol
        );
        Ok(SecurityMetadata::from_search(chosen))
    }
}

/// Exact (case-insensitive) symbol match, else the first entry.
fn pick_match(symbol: &str, matches: Vec<SearchMatch>) -> Option<SearchMatch> {
    let exact = matches
        .iter()
        .position(|m| m.symbol.trim().eq_ignore_ascii_case(symbol));

    match exact {
        Some(index) => matches.into_iter().nth(index),
        None => matches.into_iter().next(),
    }
}
