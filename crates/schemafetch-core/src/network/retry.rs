//! Retry policy for the HTTP transport.
//!
//! Provides:
//! - A bounded retry count with a fixed inter-attempt wait
//! - Classification of transport errors and status codes as retryable
//! - `Retry-After` header parsing (integer seconds)

use crate::config::NetworkConfig;
use reqwest::{header, Response, StatusCode};
use std::time::Duration;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt; `N` allows at most `N + 1` attempts.
    pub max_retries: u32,
    /// Wait between attempts when the server sends no usable `Retry-After`.
    pub wait: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: NetworkConfig::MAX_RETRIES,
            wait: NetworkConfig::RETRY_WAIT,
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of retries.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the fixed wait between attempts.
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// The wait before the next attempt, preferring the server's hint.
    pub fn delay_for(&self, response: Option<&Response>) -> Duration {
        response.and_then(retry_after).unwrap_or(self.wait)
    }
}

/// Outcome of classifying one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retry {
    /// Transient failure; another attempt may succeed.
    Yes,
    /// Final answer; hand it to the caller as-is.
    No,
    /// Transport failure that must surface immediately.
    Abort,
}

/// Classify the result of one attempt.
pub fn classify(outcome: &std::result::Result<Response, reqwest::Error>) -> Retry {
    match outcome {
        Ok(response) => {
            if is_retryable_status(response.status().as_u16()) {
                Retry::Yes
            } else {
                Retry::No
            }
        }
        Err(e) if e.is_timeout() => Retry::Yes,
        Err(_) => Retry::Abort,
    }
}

/// Check if an HTTP status code indicates a transient failure.
///
/// 408 and 429 are retryable, as are 0 (no response) and every 5xx.
pub fn is_retryable_status(status: u16) -> bool {
    status == StatusCode::REQUEST_TIMEOUT.as_u16()
        || status == StatusCode::TOO_MANY_REQUESTS.as_u16()
        || status == 0
        || status >= 500
}

/// The server-requested wait from a `Retry-After` header, if it holds a
/// positive integer number of seconds.
pub fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|secs| *secs > 0)
        .map(|secs| Duration::from_secs(secs as u64))
}
