//! Cache-first fetching.

use super::fetcher::{Document, Fetcher};
use crate::cache::TtlCache;
use crate::cancel::CancellationToken;
use crate::Result;
use tracing::debug;

/// Wraps a [`Fetcher`] with a [`TtlCache`] lookup under a fixed key.
///
/// This is the only place the cache is populated.
#[derive(Debug)]
pub struct CachedFetcher<F> {
    fetcher: F,
    cache: TtlCache,
    key: String,
}

impl<F: Fetcher> CachedFetcher<F> {
    pub fn new(fetcher: F, cache: TtlCache, key: impl Into<String>) -> Self {
        Self {
            fetcher,
            cache,
            key: key.into(),
        }
    }

    /// Return the cached document unless `refresh` is set or the entry is
    /// missing or expired, in which case fetch and store a fresh copy.
    ///
    /// A failed fetch leaves the cache untouched.
    pub async fn fetch(&self, cancel: &CancellationToken, refresh: bool) -> Result<Document> {
        if !refresh {
            if let Some(doc) = self.cache.get(&self.key) {
                debug!("Cache hit for {}", self.key);
                return Ok(doc);
            }
        }

        debug!(
            "{} {}; fetching",
            if refresh { "Refresh requested for" } else { "Cache miss for" },
            self.key
        );
        let doc = self.fetcher.fetch(cancel).await?;
        self.cache
            .set(self.key.clone(), doc.payload.clone(), doc.source.clone());
        Ok(doc)
    }
}
