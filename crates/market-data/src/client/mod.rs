//! Request orchestration for the Alpha Vantage endpoint.
//!
//! [`AlphaVantageClient`] owns the transport and the pacing limiter. Every
//! call is paced, credentials are attached, transient failures are retried
//! with backoff, and the decoded JSON body is returned untouched.

mod rate_limiter;
mod retry;
#[cfg(any(test, feature = "test-util"))]
pub mod scripted;
mod transport;

pub use rate_limiter::PacingLimiter;
pub use retry::RetryPolicy;
pub use transport::{HttpReply, HttpTransport, ReqwestTransport, TransportFailure};

use std::sync::Arc;

use log::{debug, warn};
use reqwest::Url;
use serde_json::Value;

use crate::config::AlphaVantageConfig;
use crate::errors::{MarketDataError, RetryClass};

/// Provider identifier used in logs.
pub const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Query parameter carrying the credential.
const API_KEY_PARAM: &str = "apikey";

/// Mask printed in place of the credential.
const REDACTED: &str = "***";

/// Client for the single Alpha Vantage query endpoint.
pub struct AlphaVantageClient {
    base_url: Url,
    api_key: String,
    retry: RetryPolicy,
    limiter: Arc<PacingLimiter>,
    transport: Arc<dyn HttpTransport>,
}

impl AlphaVantageClient {
    /// Create a client using `reqwest` as transport.
    pub fn new(config: &AlphaVantageConfig) -> Result<Self, MarketDataError> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new(config.timeout)))
    }

    /// Create a client with a caller-supplied transport.
    pub fn with_transport(
        config: &AlphaVantageConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, MarketDataError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            MarketDataError::InvalidArgument(format!("invalid base URL {}: {}", config.base_url, e))
        })?;

        Ok(Self {
            base_url,
            api_key: config.api_key.clone(),
            retry: config.retry.clone(),
            limiter: Arc::new(PacingLimiter::new(config.pacing_interval)),
            transport,
        })
    }

    /// Build the request URL for `function` with its parameters and the key.
    fn build_url(&self, function: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("function", function);
            for (name, value) in params {
                query.append_pair(name, value);
            }
            query.append_pair(API_KEY_PARAM, &self.api_key);
        }
        url
    }

    /// Call `function` and return the decoded body.
    ///
    /// # Errors
    ///
    /// `MarketDataError::Transport` when the upstream cannot be reached after
    /// all attempts, answers with a non-success status, or sends a body
    /// that is not JSON.
    pub async fn call(
        &self,
        function: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, MarketDataError> {
        let url = self.build_url(function, params);
        let redacted = redact_api_key(&url);
        let attempts = self.retry.attempts();
        let mut attempt = 0;

        loop {
            self.limiter.acquire().await;
            debug!(
                "{} request (attempt {}/{}): {}",
                PROVIDER_ID,
                attempt + 1,
                attempts,
                redacted
            );

            match self.transport.get(&url).await {
                Ok(reply) => return Self::decode(function, reply),
                Err(failure)
                    if failure.retry_class() == RetryClass::WithBackoff
                        && attempt + 1 < attempts =>
                {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        "{} {} failed ({}), retrying in {:?}",
                        PROVIDER_ID,
                        function,
                        self.scrub(&failure),
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(failure) => {
                    let reason = self.scrub(&failure);
                    warn!(
                        "{} {} failed after {} attempt(s): {}",
                        PROVIDER_ID,
                        function,
                        attempt + 1,
                        reason
                    );
                    return Err(MarketDataError::transport(format!("{}: {}", function, reason)));
                }
            }
        }
    }

    /// Failure text with any occurrence of the credential masked.
    fn scrub(&self, failure: &TransportFailure) -> String {
        let text = failure.to_string();
        if self.api_key.is_empty() {
            text
        } else {
            text.replace(&self.api_key, REDACTED)
        }
    }

    fn decode(function: &str, reply: HttpReply) -> Result<Value, MarketDataError> {
        if !reply.is_success() {
            warn!("{} {} returned HTTP {}", PROVIDER_ID, function, reply.status);
            return Err(MarketDataError::Transport {
                message: format!("{}: HTTP {}", function, reply.status),
                status: Some(reply.status),
            });
        }

        serde_json::from_str(&reply.body).map_err(|e| {
            warn!("{} {} returned a body that is not JSON: {}", PROVIDER_ID, function, e);
            MarketDataError::transport(format!("{}: invalid JSON body: {}", function, e))
        })
    }
}

/// Render `url` with the credential value masked.
///
/// The parameter name stays visible so logs still show that a key was sent.
pub fn redact_api_key(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == API_KEY_PARAM {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}
