//! Scripted transport for tests.
//!
//! Compiled for this crate's own tests and, behind the `test-util` feature,
//! for integration tests and downstream crates.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use super::{HttpReply, HttpTransport, RetryPolicy, TransportFailure};
use crate::config::AlphaVantageConfig;

/// Transport replaying a fixed script and recording requested URLs.
///
/// Once the script runs out every request fails with
/// `TransportFailure::Other`.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpReply, TransportFailure>>>,
    urls: Mutex<Vec<Url>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<HttpReply, TransportFailure>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            urls: Mutex::new(Vec::new()),
        })
    }

    /// Transport answering 200 with each body in turn.
    pub fn bodies(bodies: &[&str]) -> Arc<Self> {
        Self::new(bodies.iter().map(|body| Ok(HttpReply::ok(*body))).collect())
    }

    /// Number of requests received so far.
    pub fn calls(&self) -> usize {
        locked(&self.urls).len()
    }

    /// The `function` parameter of every request, in order.
    pub fn functions(&self) -> Vec<String> {
        self.param_values("function")
    }

    /// Values of query parameter `name` across all requests, in order.
    pub fn param_values(&self, name: &str) -> Vec<String> {
        locked(&self.urls)
            .iter()
            .filter_map(|url| {
                url.query_pairs()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value.into_owned())
            })
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &Url) -> Result<HttpReply, TransportFailure> {
        locked(&self.urls).push(url.clone());
        locked(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Err(TransportFailure::Other("script exhausted".to_string())))
    }
}

/// Config with key `SECRET123`, pacing off and millisecond backoff.
pub fn fast_config() -> AlphaVantageConfig {
    AlphaVantageConfig::new("SECRET123")
        .with_base_url("https://example.test/query")
        .with_pacing_interval(Duration::ZERO)
        .with_retry(RetryPolicy {
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            ..RetryPolicy::default()
        })
}
