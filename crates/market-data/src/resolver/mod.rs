//! Region text to ISO 3166-1 alpha-2 resolution.
//!
//! Alpha Vantage fills the `region` / `Country` fields with free text: a
//! country name, an informal alias, or sometimes an exchange or city name.
//! The [`CountryResolver`] turns that text into a country code.
//!
//! # Architecture
//!
//! The resolver uses a chain of responsibility pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CountryResolver                         │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 1. Exchange locations                                   │ │
//! │  │    - "Frankfurt", "XETRA", "Tokyo", "Shenzhen" ...      │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │ miss                             │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 2. Country names (ISO 3166-1 reference)                 │ │
//! │  │    - common, official and native names, exact           │ │
//! │  │    - then fuzzy (Jaro-Winkler)                          │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │ miss                             │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 3. Aliases ("USA", "UK", ...)                           │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │ miss                             │
//! │                           ▼                                  │
//! │                         None                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use alphavantage_market_data::resolver::CountryResolver;
//!
//! let resolver = CountryResolver::new();
//! assert_eq!(resolver.resolve("XETRA"), Some("DE"));
//! assert_eq!(resolver.resolve("United Kingdom"), Some("GB"));
//! assert_eq!(resolver.resolve("USA"), Some("US"));
//! assert_eq!(resolver.resolve("Atlantis"), None);
//! ```

mod aliases;
mod chain;
mod country_registry;
mod exchange_locations;
mod traits;

use lazy_static::lazy_static;

pub use aliases::{AliasResolver, COUNTRY_ALIASES};
pub use chain::CountryResolver;
pub use country_registry::CountryNameResolver;
pub use exchange_locations::{ExchangeLocationResolver, EXCHANGE_LOCATIONS};
pub use traits::RegionResolver;

lazy_static! {
    static ref DEFAULT_RESOLVER: CountryResolver = CountryResolver::new();
}

/// Resolve optional region text with the default chain.
pub fn resolve_country_code(region: Option<&str>) -> Option<String> {
    region
        .and_then(|text| DEFAULT_RESOLVER.resolve(text))
        .map(str::to_string)
}

/// Lowercase, trim and collapse inner whitespace.
pub(crate) fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
