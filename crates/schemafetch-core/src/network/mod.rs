//! Network layer: URL construction, retries and bounded fetching.
//!
//! This module provides:
//! - Version validation and origin-pinned URL building
//! - An HTTP transport that retries transient failures
//! - A size-capped single-URL fetcher
//! - Cache-first fetching on top of [`crate::cache::TtlCache`]

mod cached;
mod client;
mod fetcher;
mod retry;
mod url_builder;
mod version;

pub use cached::CachedFetcher;
pub use client::RetryTransport;
pub use fetcher::{Document, Fetcher, HttpFetcher};
pub use retry::{classify, is_retryable_status, retry_after, Retry, RetryConfig};
pub use url_builder::UrlBuilder;
pub use version::{validate_version, LATEST};
