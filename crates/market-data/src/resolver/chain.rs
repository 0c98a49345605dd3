//! Resolver chain - composite resolver that tries resolvers in order.

use log::debug;

use super::aliases::AliasResolver;
use super::country_registry::CountryNameResolver;
use super::exchange_locations::ExchangeLocationResolver;
use super::normalize;
use super::traits::RegionResolver;

/// Composite resolver that tries multiple resolvers in order.
///
/// The resolution order is:
/// 1. Exchange and city names
/// 2. Country names from the ISO 3166-1 reference
/// 3. Informal aliases
///
/// The chain stops at the first resolver that returns a code.
pub struct CountryResolver {
    resolvers: Vec<Box<dyn RegionResolver>>,
}

impl CountryResolver {
    /// Create a CountryResolver with the default resolver order.
    pub fn new() -> Self {
        Self {
            resolvers: vec![
                Box::new(ExchangeLocationResolver),
                Box::new(CountryNameResolver::new()),
                Box::new(AliasResolver),
            ],
        }
    }

    /// Create a chain from explicit resolvers, tried in the given order.
    pub fn with_resolvers(resolvers: Vec<Box<dyn RegionResolver>>) -> Self {
        Self { resolvers }
    }

    /// Resolve free region text to an ISO 3166-1 alpha-2 code.
    ///
    /// Empty input and unrecognized text give `None`.
    pub fn resolve(&self, region: &str) -> Option<&'static str> {
        let normalized = normalize(region);
        if normalized.is_empty() {
            return None;
        }

        for resolver in &self.resolvers {
            if let Some(code) = resolver.resolve(&normalized) {
                debug!("Region '{}' resolved to {} by {}", region, code, resolver.name());
                return Some(code);
            }
        }

        debug!("Region '{}' did not match any country", region);
        None
    }
}

impl Default for CountryResolver {
    fn default() -> Self {
        Self::new()
    }
}
