//! Classification of upstream bodies.
//!
//! Alpha Vantage answers HTTP 200 for almost everything and signals problems
//! in the body instead: an `Error Message` for rejected calls, a `Note` or
//! `Information` advisory (usually a rate limit) in place of the data. Every
//! body goes through [`classify`] before any function-specific key is read.

use log::{debug, warn};
use serde_json::Value;

use crate::errors::MarketDataError;

/// Field carrying an explicit upstream error.
pub const ERROR_MESSAGE_KEY: &str = "Error Message";

/// Advisory field, commonly a rate-limit warning.
pub const NOTE_KEY: &str = "Note";

/// Newer advisory field used for rate limits and premium-only functions.
pub const INFORMATION_KEY: &str = "Information";

/// Outcome of inspecting an upstream body.
#[derive(Debug, PartialEq)]
pub enum Classification<'a> {
    /// The body can be used.
    Ok(&'a Value),
    /// The upstream reported an explicit error.
    ProviderError(String),
    /// The expected data is absent; carries the advisory or default message.
    Empty(String),
}

/// Classify `body`.
///
/// With `expected_key` set, a body lacking that key (and lacking an error
/// message) is `Empty`. Without it only the error message is checked.
pub fn classify<'a>(
    body: &'a Value,
    expected_key: Option<&str>,
    default_message: &str,
) -> Classification<'a> {
    if let Some(message) = body.get(ERROR_MESSAGE_KEY) {
        return Classification::ProviderError(text_of(message));
    }

    match expected_key {
        Some(key) if body.get(key).is_none() => Classification::Empty(
            advisory(body).unwrap_or_else(|| default_message.to_string()),
        ),
        _ => Classification::Ok(body),
    }
}

/// Classify `body` and turn anything but `Ok` into a typed error.
pub fn ensure_data<'a>(
    body: &'a Value,
    expected_key: Option<&str>,
    default_message: &str,
) -> Result<&'a Value, MarketDataError> {
    let context = expected_key.unwrap_or("response");

    match classify(body, expected_key, default_message) {
        Classification::Ok(body) => {
            debug!("Alpha Vantage: '{}' present", context);
            Ok(body)
        }
        Classification::ProviderError(message) => {
            warn!("Alpha Vantage error while reading '{}': {}", context, message);
            Err(MarketDataError::Provider { message })
        }
        Classification::Empty(message) => {
            warn!("Alpha Vantage returned no '{}': {}", context, message);
            Err(MarketDataError::NoData { message })
        }
    }
}

/// The body's advisory text, `Note` first, then `Information`.
pub fn advisory(body: &Value) -> Option<String> {
    body.get(NOTE_KEY)
        .or_else(|| body.get(INFORMATION_KEY))
        .map(text_of)
}

/// True when the body carries no data at all: not an object, an empty
/// object, or an object holding only advisory fields.
pub fn is_blank_payload(body: &Value) -> bool {
    match body.as_object() {
        Some(map) => map
            .keys()
            .all(|key| key == NOTE_KEY || key == INFORMATION_KEY),
        None => true,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
