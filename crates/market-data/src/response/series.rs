//! Date-keyed series extraction.
//!
//! Daily functions return `{"YYYY-MM-DD": {"1. open": "...", "4. close": "..."}, ...}`.
//! [`extract_series`] walks such a map once for any record type.

use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::models::DateRange;

/// Date format used for series keys.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT).ok()
}

/// Parse a positive decimal from a JSON string or number.
///
/// Returns `None` for missing, non-numeric, zero or negative values.
pub fn parse_positive_decimal(value: &Value) -> Option<Decimal> {
    let parsed = match value {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        _ => None,
    }?;

    (parsed > Decimal::ZERO).then_some(parsed)
}

/// Build one record per usable row of `rows`.
///
/// Rows dated outside `range` are dropped first. Rows with an unparseable
/// date or a missing/invalid/non-positive `value_field` are skipped and
/// logged. The result is ordered by date, ascending.
pub fn extract_series<T, F>(
    rows: &Map<String, Value>,
    value_field: &str,
    range: DateRange,
    mut build: F,
) -> Vec<T>
where
    F: FnMut(NaiveDate, Decimal) -> T,
{
    let mut dated: Vec<(NaiveDate, Decimal)> = Vec::new();

    for (date_str, row) in rows {
        let Some(date) = parse_date(date_str) else {
            warn!("Skipping series row with unparseable date '{}'", date_str);
            continue;
        };

        if !range.contains(date) {
            continue;
        }

        match row.get(value_field).and_then(parse_positive_decimal) {
            Some(value) => dated.push((date, value)),
            None => warn!(
                "Skipping series row {}: '{}' is missing or not a positive number ({:?})",
                date,
                value_field,
                row.get(value_field)
            ),
        }
    }

    dated.sort_by_key(|(date, _)| *date);
    debug!(
        "Extracted {} of {} series rows for {}..={}",
        dated.len(),
        rows.len(),
        range.start(),
        range.end()
    );

    dated
        .into_iter()
        .map(|(date, value)| build(date, value))
        .collect()
}

/// Warn when `start` lies beyond the reach of a `compact` series.
///
/// Returns whether the advisory fired. Never fails the call: a window
/// reaching past the calendar's range fires nothing.
pub fn check_compact_window(start: NaiveDate, today: NaiveDate, window_days: i64) -> bool {
    let Some(oldest_covered) =
        Duration::try_days(window_days).and_then(|window| today.checked_sub_signed(window))
    else {
        return false;
    };
    if start < oldest_covered {
        warn!(
            "Start date {} is more than {} days before {}; compact output may not reach that far back",
            start, window_days, today
        );
        return true;
    }
    false
}
