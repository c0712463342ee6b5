//! In-memory TTL cache for fetched documents.
//!
//! Entries are keyed by source key (the resolved URL) and expire a fixed time
//! after insertion. Expiry is lazy: an expired entry simply reads as absent
//! and is replaced by the next `set` for the same key. Nothing is written to
//! disk.

use crate::config::CacheConfig;
use crate::network::Document;
use bytes::Bytes;
use mini_moka::sync::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

/// A cached document with its insertion time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub document: Document,
    pub inserted_at: Instant,
}

impl CacheEntry {
    /// Whether the entry is younger than `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() < ttl
    }
}

/// Process-wide document cache. Cheap to clone; clones share entries.
#[derive(Clone)]
pub struct TtlCache {
    entries: Cache<String, CacheEntry>,
    ttl: Duration,
}

impl TtlCache {
    /// Create a cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder().time_to_live(ttl).build(),
            ttl,
        }
    }

    /// Lifetime of an entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up `key`, returning the document only while it is fresh.
    pub fn get(&self, key: &str) -> Option<Document> {
        let entry = self.entries.get(&key.to_string())?;
        if entry.is_fresh(self.ttl) {
            Some(entry.document)
        } else {
            debug!("Cache entry for {} expired", key);
            None
        }
    }

    /// Store `payload` under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, payload: Bytes, source: impl Into<String>) {
        let entry = CacheEntry {
            document: Document {
                payload,
                source: source.into(),
            },
            inserted_at: Instant::now(),
        };
        self.entries.insert(key.into(), entry);
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new(CacheConfig::DEFAULT_TTL)
    }
}

impl std::fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache").field("ttl", &self.ttl).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_set_then_get() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("k", Bytes::from_static(b"payload"), "https://example.com/k");

        let doc = cache.get("k").expect("fresh entry should hit");
        assert_eq!(doc.payload, Bytes::from_static(b"payload"));
        assert_eq!(doc.source, "https://example.com/k");
    }

    #[test]
    fn test_missing_key() {
        let cache = TtlCache::new(Duration::from_secs(60));
        assert!(cache.get("absent").is_none());
    }

    #[test]
    fn test_entry_expires() {
        let cache = TtlCache::new(Duration::from_millis(50));
        cache.set("k", Bytes::from_static(b"old"), "src");
        assert!(cache.get("k").is_some());

        thread::sleep(Duration::from_millis(120));

        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_set_after_expiry_refreshes() {
        let cache = TtlCache::new(Duration::from_millis(50));
        cache.set("k", Bytes::from_static(b"old"), "src");
        thread::sleep(Duration::from_millis(120));

        cache.set("k", Bytes::from_static(b"new"), "src");

        assert_eq!(cache.get("k").unwrap().payload, Bytes::from_static(b"new"));
    }

    #[test]
    fn test_set_replaces_whole_entry() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("k", Bytes::from_static(b"one"), "https://a.example/1");
        cache.set("k", Bytes::from_static(b"two"), "https://a.example/2");

        let doc = cache.get("k").unwrap();
        assert_eq!(doc.payload, Bytes::from_static(b"two"));
        assert_eq!(doc.source, "https://a.example/2");
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("a", Bytes::from_static(b"A"), "src-a");
        cache.set("b", Bytes::from_static(b"B"), "src-b");

        assert_eq!(cache.get("a").unwrap().payload, Bytes::from_static(b"A"));
        assert_eq!(cache.get("b").unwrap().payload, Bytes::from_static(b"B"));
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let other = cache.clone();
        other.set("k", Bytes::from_static(b"shared"), "src");

        assert!(cache.get("k").is_some());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = TtlCache::new(Duration::from_secs(60));

        thread::scope(|scope| {
            for t in 0..8 {
                let cache = &cache;
                scope.spawn(move || {
                    for i in 0..100 {
                        let key = format!("key-{}", i % 10);
                        cache.set(key.clone(), Bytes::from(format!("{t}-{i}")), "src");
                        assert!(cache.get(&key).is_some());
                    }
                });
            }
        });

        for i in 0..10 {
            assert!(cache.get(&format!("key-{i}")).is_some());
        }
    }

    #[test]
    fn test_entry_freshness() {
        let entry = CacheEntry {
            document: Document {
                payload: Bytes::new(),
                source: String::new(),
            },
            inserted_at: Instant::now(),
        };
        assert!(entry.is_fresh(Duration::from_secs(60)));
        assert!(!entry.is_fresh(Duration::ZERO));
    }
}
