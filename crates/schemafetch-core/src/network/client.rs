//! HTTP transport with bounded retries.
//!
//! Wraps a reqwest [`Client`] and re-sends a request while the outcome is a
//! transient failure (timeout, 408, 429, 5xx). The caller always gets the last
//! real response once retries run out, never a synthesized error.

use super::retry::{classify, Retry, RetryConfig};
use crate::cancel::CancellationToken;
use crate::config::{FetchConfig, NetworkConfig};
use crate::{FetchError, Result};
use reqwest::{Client, Request, Response};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// HTTP client that retries transient failures with a fixed delay,
/// honouring `Retry-After` hints.
#[derive(Debug, Clone)]
pub struct RetryTransport {
    client: Client,
    retry: RetryConfig,
}

impl RetryTransport {
    /// Create a transport with default retry and timeout settings.
    pub fn new() -> Result<Self> {
        Self::with_config(RetryConfig::default(), NetworkConfig::ATTEMPT_TIMEOUT)
    }

    /// Create a transport with a custom retry policy and per-attempt timeout.
    pub fn with_config(retry: RetryConfig, attempt_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(attempt_timeout)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| FetchError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, retry })
    }

    /// Create a transport from the pipeline configuration.
    pub fn from_fetch_config(config: &FetchConfig) -> Result<Self> {
        let retry = RetryConfig::new()
            .with_max_retries(config.max_retries)
            .with_wait(config.retry_wait);
        Self::with_config(retry, config.attempt_timeout)
    }

    /// Get a reference to the underlying reqwest client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Issue a GET for `url` through the retry loop.
    pub async fn get(&self, url: &Url, cancel: &CancellationToken) -> Result<Response> {
        let request = self.client.get(url.clone()).build()?;
        self.round_trip(request, cancel).await
    }

    /// Execute `request`, retrying transient failures.
    ///
    /// With `max_retries = N` at most `N + 1` attempts are made. A request
    /// whose body cannot be replayed is attempted once. Cancellation aborts
    /// both the in-flight attempt and any pending wait.
    pub async fn round_trip(
        &self,
        mut request: Request,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        let max_retries = self.retry.max_retries;
        let mut attempt: u32 = 0;

        loop {
            cancel.check()?;

            let replay = request.try_clone();
            let method = request.method().clone();
            let url = request.url().clone();

            let outcome = tokio::select! {
                result = self.client.execute(request) => result,
                _ = cancel.cancelled() => return Err(FetchError::Cancelled),
            };

            if attempt >= max_retries {
                if attempt > 0 {
                    debug!(
                        "{} {} finished after {} attempts: {}",
                        method,
                        url,
                        attempt + 1,
                        describe(&outcome)
                    );
                }
                return outcome.map_err(FetchError::Request);
            }

            match classify(&outcome) {
                Retry::No => return outcome.map_err(FetchError::Request),
                Retry::Abort => {
                    debug!("{} {} failed permanently: {}", method, url, describe(&outcome));
                    return outcome.map_err(FetchError::Request);
                }
                Retry::Yes => {}
            }

            let Some(next) = replay else {
                debug!(
                    "{} {} has a streaming body that cannot be replayed; not retrying",
                    method, url
                );
                return outcome.map_err(FetchError::Request);
            };

            let delay = self.retry.delay_for(outcome.as_ref().ok());
            warn!(
                "Attempt {}/{} for {} {} failed: {}. Retrying in {:?}",
                attempt + 1,
                max_retries + 1,
                method,
                url,
                describe(&outcome),
                delay
            );
            // Release the previous response body before the next attempt.
            drop(outcome);

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = cancel.cancelled() => {
                    debug!("{} {} cancelled while waiting to retry", method, url);
                    return Err(FetchError::Cancelled);
                }
            }

            request = next;
            attempt += 1;
        }
    }
}

fn describe(outcome: &std::result::Result<Response, reqwest::Error>) -> String {
    match outcome {
        Ok(response) => format!("status {}", response.status()),
        Err(e) => e.to_string(),
    }
}
