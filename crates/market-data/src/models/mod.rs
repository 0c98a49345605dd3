//! Domain records produced by the adapter
//!
//! - `types` - Type aliases for codes (Currency, Mic, CountryCode)
//! - `date_range` - Inclusive date window used by all range lookups
//! - `exchange_rate` - FX rate records (ExchangeRate)
//! - `price` - Security close prices (Price)
//! - `profile` - Security metadata (SecurityProfile)
//! - `search` - Symbol search hits (SecuritySearchResult)

mod date_range;
mod exchange_rate;
mod price;
mod profile;
mod search;
mod types;

pub use date_range::DateRange;
pub use exchange_rate::ExchangeRate;
pub use price::Price;
pub use profile::SecurityProfile;
pub use search::SecuritySearchResult;
pub use types::{CountryCode, Currency, Mic};
