//! Provider abstractions and the Alpha Vantage implementation.
//!
//! This module contains:
//! - The `MarketDataProvider`, `ExchangeRateProvider` and `SecurityProvider` traits
//! - [`alpha_vantage::AlphaVantageProvider`], which composes the client,
//!   the response layer and both resolvers into those operations

mod traits;

pub mod alpha_vantage;

// Re-exports
pub use traits::{ExchangeRateProvider, MarketDataProvider, SecurityProvider};
