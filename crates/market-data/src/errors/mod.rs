//! Error types and retry classification for the Alpha Vantage adapter.
//!
//! This module provides:
//! - [`MarketDataError`]: The error enum returned by every public operation
//! - [`ProviderOutcome`]: The uniform success-or-typed-error result
//! - [`RetryClass`]: Whether a transport failure is worth another attempt

mod retry;

pub use retry::RetryClass;

use chrono::NaiveDate;
use thiserror::Error;

/// Result type returned by every public provider operation.
///
/// Callers branch on the variant; no typed failure escapes a provider
/// operation any other way.
pub type ProviderOutcome<T> = Result<T, MarketDataError>;

/// Errors that can occur while talking to Alpha Vantage.
///
/// Transient transport failures are retried inside the client before one
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// Network failure, timeout, non-success HTTP status or an undecodable
    /// body, reported once retries are exhausted.
    #[error("Transport error: {message}")]
    Transport {
        /// Human readable failure detail
        message: String,
        /// HTTP status code when the server answered with an error status
        status: Option<u16>,
    },

    /// The upstream body carried an explicit `Error Message`.
    #[error("Provider error: {message}")]
    Provider {
        /// The message exactly as the provider sent it
        message: String,
    },

    /// The expected data key was missing and no error message was given.
    /// Usually a disguised rate limit or an unsupported symbol.
    #[error("No data: {message}")]
    NoData {
        /// The provider advisory note, or a default message
        message: String,
    },

    /// Security metadata resolution exhausted the primary and fallback lookups.
    #[error("Security not found: {symbol}")]
    NotFound {
        /// The symbol that was requested
        symbol: String,
    },

    /// A single-date lookup found no record for that date.
    #[error("No data for date: {date}")]
    EmptyResult {
        /// The requested date
        date: NaiveDate,
    },

    /// The caller passed an argument the adapter cannot work with.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl MarketDataError {
    /// Build a transport error without an HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
        }
    }
}
