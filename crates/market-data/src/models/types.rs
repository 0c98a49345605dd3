/// Currency code (ISO 4217), e.g. "USD"
pub type Currency = String;

/// Market Identifier Code (ISO 10383), e.g. "XNAS"
pub type Mic = String;

/// Country code (ISO 3166-1 alpha-2), e.g. "DE"
pub type CountryCode = String;
