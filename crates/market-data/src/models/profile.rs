use serde::{Deserialize, Serialize};

use super::types::{Currency, Mic};

/// Security metadata as reported by the provider.
///
/// `description`, `kind` and `currency` are filled only when the company
/// overview answered. When the symbol had to be found through search,
/// `description` and `currency` stay empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityProfile {
    /// Ticker (e.g., "IBM")
    pub symbol: String,

    /// Company or fund name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Related links; this provider never supplies them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,

    /// Logo URL; this provider never supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    /// Business description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Instrument kind as free text (e.g., "Common Stock", "ETF")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Exchange identifier, as supplied by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_operating_mic: Option<Mic>,

    /// Trading currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}
