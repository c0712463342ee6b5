//! Error types for schemafetch.
//!
//! Every variant names the stage that failed (URL construction, request
//! execution or body read) and, where safe, the offending value.

use std::time::Duration;
use thiserror::Error;

/// Main error type for the fetch pipeline.
#[derive(Debug, Error)]
pub enum FetchError {
    // Validation errors
    #[error("invalid version {version:?}: must be semver (e.g., v1.2.3) or \"latest\"")]
    InvalidVersion { version: String },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[source] url::ParseError),

    #[error("base URL must use HTTPS, got scheme {scheme:?}")]
    InsecureBaseUrl { scheme: String },

    #[error("base URL must have a host")]
    MissingHost,

    #[error("constructed invalid URL: {0}")]
    InvalidUrl(#[source] url::ParseError),

    #[error("constructed URL has unexpected origin: got {actual}, want {expected}")]
    UnexpectedOrigin { actual: String, expected: String },

    #[error("building fetch URL: {0}")]
    BuildUrl(#[source] Box<FetchError>),

    #[error("unknown source {name:?}: must be \"lexicon\" or \"schema-docs\"")]
    UnknownSource { name: String },

    // Network errors
    #[error("executing request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("{method} {url:?}: response status code {status}: {reason}")]
    Status {
        method: String,
        url: String,
        status: u16,
        reason: String,
    },

    #[error("reading response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("request timeout after {0:?}")]
    Timeout(Duration),

    #[error("operation was cancelled")]
    Cancelled,

    // Configuration errors
    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Request(err)
    }
}

impl FetchError {
    /// Whether this error was raised before any network call was made.
    pub fn is_validation(&self) -> bool {
        match self {
            FetchError::InvalidVersion { .. }
            | FetchError::InvalidBaseUrl(_)
            | FetchError::InsecureBaseUrl { .. }
            | FetchError::MissingHost
            | FetchError::InvalidUrl(_)
            | FetchError::UnexpectedOrigin { .. }
            | FetchError::UnknownSource { .. } => true,
            FetchError::BuildUrl(inner) => inner.is_validation(),
            _ => false,
        }
    }

    /// Whether the operation was aborted through its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}
