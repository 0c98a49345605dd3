//! Shared fixtures for the provider scenarios.

use std::sync::Arc;

use alphavantage_market_data::AlphaVantageProvider;

pub use alphavantage_market_data::client::scripted::{fast_config, ScriptedTransport};

pub fn provider_with(upstream: &Arc<ScriptedTransport>) -> AlphaVantageProvider {
    AlphaVantageProvider::with_transport(fast_config(), upstream.clone())
        .expect("test config is valid")
}
