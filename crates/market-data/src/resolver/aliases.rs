//! Informal country aliases.

use super::traits::RegionResolver;

/// Informal names that are not in the ISO reference.
pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("USA", "US"),
    ("US", "US"),
    ("U.S.", "US"),
    ("U.S.A.", "US"),
    ("United States", "US"),
    ("America", "US"),
    ("UK", "GB"),
    ("U.K.", "GB"),
    ("Great Britain", "GB"),
    ("Britain", "GB"),
    ("England", "GB"),
    ("Scotland", "GB"),
    ("Wales", "GB"),
    ("UAE", "AE"),
];

/// Last link of the chain: alias lookup.
pub struct AliasResolver;

impl RegionResolver for AliasResolver {
    fn name(&self) -> &'static str {
        "aliases"
    }

    fn resolve(&self, normalized: &str) -> Option<&'static str> {
        COUNTRY_ALIASES
            .iter()
            .find(|(alias, _)| alias.to_lowercase() == normalized)
            .map(|(_, code)| *code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        let resolver = AliasResolver;
        assert_eq!(resolver.resolve("usa"), Some("US"));
        assert_eq!(resolver.resolve("united states"), Some("US"));
        assert_eq!(resolver.resolve("uk"), Some("GB"));
        assert_eq!(resolver.resolve("france"), None);
    }
}
