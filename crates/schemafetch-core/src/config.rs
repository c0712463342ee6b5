//! Centralized configuration for schemafetch.
//!
//! Constants for network behaviour, caching and the trusted document sources,
//! plus [`FetchConfig`], the construction-time knobs handed to the pipeline.

use crate::network::LATEST;
use std::time::Duration;

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    /// Overall deadline for one fetch, retries included.
    pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
    /// Deadline for a single attempt; expiry is a retryable timeout.
    pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(15);
    pub const MAX_RETRIES: u32 = 3;
    pub const RETRY_WAIT: Duration = Duration::from_secs(1);
    pub const MAX_RESPONSE_BYTES: u64 = 4 * 1024 * 1024; // 4 MiB
    pub const USER_AGENT: &'static str = concat!("schemafetch/", env!("CARGO_PKG_VERSION"));
}

/// In-memory cache configuration.
pub struct CacheConfig;

impl CacheConfig {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);
}

/// Trusted bases, suffixes and default versions of the known sources.
pub struct SourceConfig;

impl SourceConfig {
    pub const LEXICON_BASE_URL: &'static str = "https://raw.githubusercontent.com/gemaraproj/gemara/";
    pub const LEXICON_PATH_SUFFIX: &'static str = "/docs/lexicon.yaml";
    pub const LEXICON_DEFAULT_VERSION: &'static str = "v0.19.1";

    pub const SCHEMA_DOCS_BASE_URL: &'static str =
        "https://registry.cue.works/docs/github.com/gemaraproj/gemara@";
    pub const SCHEMA_DOCS_PATH_SUFFIX: &'static str = "";
    pub const SCHEMA_DOCS_DEFAULT_VERSION: &'static str = LATEST;
}

/// Construction-time settings for the fetch pipeline.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Lifetime of a cache entry.
    pub cache_ttl: Duration,
    /// Response body cap; zero means [`NetworkConfig::MAX_RESPONSE_BYTES`].
    pub max_response_bytes: u64,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Wait between attempts when the server gives no `Retry-After`.
    pub retry_wait: Duration,
    pub fetch_timeout: Duration,
    pub attempt_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            cache_ttl: CacheConfig::DEFAULT_TTL,
            max_response_bytes: NetworkConfig::MAX_RESPONSE_BYTES,
            max_retries: NetworkConfig::MAX_RETRIES,
            retry_wait: NetworkConfig::RETRY_WAIT,
            fetch_timeout: NetworkConfig::FETCH_TIMEOUT,
            attempt_timeout: NetworkConfig::ATTEMPT_TIMEOUT,
        }
    }
}

impl FetchConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_max_response_bytes(mut self, bytes: u64) -> Self {
        self.max_response_bytes = bytes;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_retry_wait(mut self, wait: Duration) -> Self {
        self.retry_wait = wait;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }
}
