//! HTTP transport seam.
//!
//! The orchestrator only needs "GET this URL, give me status and body".
//! Keeping that behind a trait lets tests script upstream replies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;

use crate::errors::RetryClass;

/// Raw upstream reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpReply {
    /// A 200 reply with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to get any reply from the upstream.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportFailure {
    /// Could not connect (DNS, refused, reset).
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request did not finish within the timeout.
    #[error("request timed out")]
    Timeout,

    /// Any other client-side failure.
    #[error("request failed: {0}")]
    Other(String),
}

impl TransportFailure {
    /// Connection failures and timeouts are worth another attempt.
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Connect(_) | Self::Timeout => RetryClass::WithBackoff,
            Self::Other(_) => RetryClass::Never,
        }
    }
}

impl From<reqwest::Error> for TransportFailure {
    /// The request URL carries the credential, so it is dropped from the text.
    fn from(error: reqwest::Error) -> Self {
        let error = error.without_url();
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect(error.to_string())
        } else {
            Self::Other(error.to_string())
        }
    }
}

/// Issues GET requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpReply, TransportFailure>;
}

/// Production transport backed by `reqwest`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpReply, TransportFailure> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpReply { status, body })
    }
}
