//! schemafetch core - origin-pinned, retrying, cached document fetching.
//!
//! Versioned schema references and terminology glossaries are fetched over
//! HTTPS. A version string is validated before it is spliced into a trusted
//! base URL, the result is checked against the base's origin, transient
//! failures are retried, and repeated requests are served from an in-memory
//! TTL cache.
//!
//! # Example
//!
//! ```rust,no_run
//! use schemafetch_core::{CancellationToken, Source, SourceRegistry};
//!
//! #[tokio::main]
//! async fn main() -> schemafetch_core::Result<()> {
//!     let registry = SourceRegistry::new()?;
//!     let cancel = CancellationToken::new();
//!
//!     let doc = registry.fetch(Source::Lexicon, Some("v0.19.1"), false, &cancel).await?;
//!     println!("{} bytes from {}", doc.payload.len(), doc.source);
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod cancel;
pub mod config;
pub mod error;
pub mod network;
pub mod source;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use cache::TtlCache;
pub use cancel::{CancellationToken, CancelledError};
pub use config::FetchConfig;
pub use error::{FetchError, Result};
pub use network::{
    validate_version, CachedFetcher, Document, Fetcher, HttpFetcher, RetryConfig, RetryTransport,
    UrlBuilder,
};
pub use source::{Source, SourceRegistry};
