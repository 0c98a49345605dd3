use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Currency, Mic};

/// Daily close price for a security.
///
/// The currency is not part of the time-series reply; it comes from the
/// metadata lookup performed before the series was fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Ticker as requested (e.g., "AAPL")
    pub symbol: String,

    /// Trading day
    pub date: NaiveDate,

    /// Close price, always positive
    pub price: Decimal,

    /// Currency the security trades in
    pub currency: Currency,

    /// Exchange identifier supplied by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_operating_mic: Option<Mic>,
}

impl Price {
    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        price: Decimal,
        currency: impl Into<Currency>,
        exchange_operating_mic: Option<Mic>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            price,
            currency: currency.into(),
            exchange_operating_mic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_serialization_skips_missing_mic() {
        let price = Price::new(
            "IBM",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            dec!(150.25),
            "USD",
            None,
        );

        let json = serde_json::to_string(&price).unwrap();
        assert!(json.contains("\"symbol\":\"IBM\""));
        assert!(json.contains("2024-01-15"));
        assert!(!json.contains("exchange_operating_mic"));
    }
}
