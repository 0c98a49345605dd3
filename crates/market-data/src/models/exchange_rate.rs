use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Currency;

/// Daily FX rate for one currency pair.
///
/// `rate` is always positive: rows with zero, negative or missing values
/// are dropped before a record is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Trading day the rate closed on
    pub date: NaiveDate,

    /// Base currency (e.g., "EUR")
    pub from: Currency,

    /// Quote currency (e.g., "USD")
    pub to: Currency,

    /// Units of `to` per one unit of `from`
    pub rate: Decimal,
}

impl ExchangeRate {
    pub fn new(
        date: NaiveDate,
        from: impl Into<Currency>,
        to: impl Into<Currency>,
        rate: Decimal,
    ) -> Self {
        Self {
            date,
            from: from.into(),
            to: to.into(),
            rate,
        }
    }
}
