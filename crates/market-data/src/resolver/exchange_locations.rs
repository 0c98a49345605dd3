//! Exchange and city names seen in the provider's region field.

use super::traits::RegionResolver;

/// Exchange/city name to ISO 3166-1 alpha-2 code.
///
/// Matched case-insensitively against the whole region text.
pub const EXCHANGE_LOCATIONS: &[(&str, &str)] = &[
    // North America
    ("NYSE", "US"),
    ("NASDAQ", "US"),
    ("New York", "US"),
    ("Toronto", "CA"),
    ("TSX Venture", "CA"),
    ("Montreal", "CA"),
    ("Vancouver", "CA"),
    ("Mexico City", "MX"),
    // South America
    ("Brazil/Sao Paolo", "BR"),
    ("Sao Paulo", "BR"),
    ("São Paulo", "BR"),
    ("Buenos Aires", "AR"),
    ("Santiago", "CL"),
    // UK & Ireland
    ("London", "GB"),
    ("Dublin", "IE"),
    // Germany
    ("Frankfurt", "DE"),
    ("XETRA", "DE"),
    ("Berlin", "DE"),
    ("Munich", "DE"),
    ("Stuttgart", "DE"),
    ("Hamburg", "DE"),
    ("Dusseldorf", "DE"),
    // Euronext and the rest of Western Europe
    ("Paris", "FR"),
    ("Amsterdam", "NL"),
    ("Brussels", "BE"),
    ("Lisbon", "PT"),
    ("Milan", "IT"),
    ("Madrid", "ES"),
    ("Zurich", "CH"),
    ("SIX Swiss", "CH"),
    ("Vienna", "AT"),
    // Nordic
    ("Stockholm", "SE"),
    ("Oslo", "NO"),
    ("Copenhagen", "DK"),
    ("Helsinki", "FI"),
    // Central/Eastern Europe, Middle East, Africa
    ("Warsaw", "PL"),
    ("Athens", "GR"),
    ("Istanbul", "TR"),
    ("Tel Aviv", "IL"),
    ("Johannesburg", "ZA"),
    // Asia-Pacific
    ("Tokyo", "JP"),
    ("Osaka", "JP"),
    ("Hong Kong", "HK"),
    ("Shanghai", "CN"),
    ("Shenzhen", "CN"),
    ("Beijing", "CN"),
    ("Seoul", "KR"),
    ("Taipei", "TW"),
    ("India/Bombay", "IN"),
    ("Bombay", "IN"),
    ("Mumbai", "IN"),
    ("NSE", "IN"),
    ("BSE", "IN"),
    ("Singapore", "SG"),
    ("Jakarta", "ID"),
    ("Bangkok", "TH"),
    ("Kuala Lumpur", "MY"),
    ("Sydney", "AU"),
    ("ASX", "AU"),
];

/// First link of the chain: exact exchange/city lookup.
pub struct ExchangeLocationResolver;

impl RegionResolver for ExchangeLocationResolver {
    fn name(&self) -> &'static str {
        "exchange_locations"
    }

    fn resolve(&self, normalized: &str) -> Option<&'static str> {
        EXCHANGE_LOCATIONS
            .iter()
            .find(|(location, _)| location.to_lowercase() == normalized)
            .map(|(_, code)| *code)
    }
}
