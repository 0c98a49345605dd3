//! Alpha Vantage Market Data Crate
//!
//! This crate adapts the Alpha Vantage API into a small set of stable
//! market data records.
//!
//! # Overview
//!
//! The crate covers:
//! - FX rates (daily series and realtime)
//! - Security daily closes, metadata and keyword search
//! - Request pacing and retry with backoff against the single query endpoint
//! - Classification of the provider's in-body error signaling
//! - Free-text region to ISO 3166-1 country code resolution
//!
//! # Architecture
//!
//! ```text
//! +----------------------+
//! | AlphaVantageProvider |  (ExchangeRateProvider, SecurityProvider)
//! +----------------------+
//!      |            |
//!      |            v
//!      |   +------------------+     +------------------+
//!      |   | SecurityResolver | --> |  CountryResolver |  (region text -> ISO code)
//!      |   +------------------+     +------------------+
//!      v            |
//! +------------------------+
//! |  AlphaVantageClient    |  (pacing, retry, credentials)
//! +------------------------+
//!              |
//!              v
//! +------------------------+
//! | classify / extract     |  (response layer)
//! +------------------------+
//!              |
//!              v
//! +------------------------+
//! | ExchangeRate / Price   |  (domain records)
//! +------------------------+
//! ```
//!
//! # Core Types
//!
//! - [`AlphaVantageProvider`] - The public operation set
//! - [`AlphaVantageConfig`] - Endpoint, credentials, pacing and retry settings
//! - [`ExchangeRate`], [`Price`], [`SecurityProfile`], [`SecuritySearchResult`] - Records
//! - [`MarketDataError`] / [`ProviderOutcome`] - Error taxonomy and result type

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;
pub mod response;
pub mod security;

// Re-export configuration
pub use config::{AlphaVantageConfig, OutputSize};

// Re-export errors
pub use errors::{MarketDataError, ProviderOutcome, RetryClass};

// Re-export all public types from models
pub use models::{
    CountryCode, Currency, DateRange, ExchangeRate, Mic, Price, SecurityProfile,
    SecuritySearchResult,
};

// Re-export resolver types
pub use resolver::{resolve_country_code, CountryResolver, RegionResolver};

// Re-export client and provider types
pub use client::{AlphaVantageClient, HttpReply, HttpTransport, RetryPolicy, TransportFailure};
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::{ExchangeRateProvider, MarketDataProvider, SecurityProvider};
pub use security::{MetadataSource, SecurityMetadata, SecurityResolver};
