//! Search result models for symbol lookup.

use serde::{Deserialize, Serialize};

use super::types::{CountryCode, Mic};

/// Result from a keyword search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySearchResult {
    /// Symbol/ticker (e.g., "TSCO.LON")
    pub symbol: String,

    /// Display name (e.g., "Tesco PLC")
    pub name: String,

    /// Logo URL; this provider never supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    /// Exchange MIC; this provider never supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_operating_mic: Option<Mic>,

    /// Country resolved from the provider's region text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<CountryCode>,
}

impl SecuritySearchResult {
    /// Create a new search result with required fields.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            logo_url: None,
            exchange_operating_mic: None,
            country_code: None,
        }
    }

    /// Set the country code.
    pub fn with_country_code(mut self, country_code: Option<impl Into<CountryCode>>) -> Self {
        self.country_code = country_code.map(Into::into);
        self
    }
}
