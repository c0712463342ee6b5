//! Logical document sources and the registry that fetches them.
//!
//! Callers name a [`Source`] and optionally a version; the registry turns that
//! into a trusted URL, then serves it cache-first.

use crate::cache::TtlCache;
use crate::cancel::CancellationToken;
use crate::config::{FetchConfig, SourceConfig};
use crate::network::{CachedFetcher, Document, HttpFetcher, RetryTransport, UrlBuilder};
use crate::{FetchError, Result};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// A remote document the registry knows how to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Terminology glossary.
    Lexicon,
    /// Schema reference documentation.
    SchemaDocs,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Lexicon, Source::SchemaDocs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Lexicon => "lexicon",
            Source::SchemaDocs => "schema-docs",
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Source::Lexicon => SourceConfig::LEXICON_BASE_URL,
            Source::SchemaDocs => SourceConfig::SCHEMA_DOCS_BASE_URL,
        }
    }

    pub fn path_suffix(&self) -> &'static str {
        match self {
            Source::Lexicon => SourceConfig::LEXICON_PATH_SUFFIX,
            Source::SchemaDocs => SourceConfig::SCHEMA_DOCS_PATH_SUFFIX,
        }
    }

    /// Version used when the caller does not ask for one.
    pub fn default_version(&self) -> &'static str {
        match self {
            Source::Lexicon => SourceConfig::LEXICON_DEFAULT_VERSION,
            Source::SchemaDocs => SourceConfig::SCHEMA_DOCS_DEFAULT_VERSION,
        }
    }
}

impl FromStr for Source {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lexicon" => Ok(Source::Lexicon),
            "schema-docs" | "schema_docs" | "schemadocs" => Ok(Source::SchemaDocs),
            _ => Err(FetchError::UnknownSource {
                name: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared fetch state: one cache, one transport, one URL builder per source.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    cache: TtlCache,
    transport: Arc<RetryTransport>,
    lexicon: UrlBuilder,
    schema_docs: UrlBuilder,
    config: FetchConfig,
}

impl SourceRegistry {
    /// Create a registry with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default())
    }

    /// Create a registry from explicit settings.
    pub fn with_config(config: FetchConfig) -> Result<Self> {
        let transport = Arc::new(RetryTransport::from_fetch_config(&config)?);
        let cache = TtlCache::new(config.cache_ttl);
        Self::with_parts(config, cache, transport)
    }

    /// Create a registry around an existing cache and transport.
    pub fn with_parts(
        config: FetchConfig,
        cache: TtlCache,
        transport: Arc<RetryTransport>,
    ) -> Result<Self> {
        let lexicon = builder_for(Source::Lexicon)?;
        let schema_docs = builder_for(Source::SchemaDocs)?;
        info!(
            "Source registry ready (cache ttl {:?}, {} retries)",
            cache.ttl(),
            transport.retry_config().max_retries
        );
        Ok(Self {
            cache,
            transport,
            lexicon,
            schema_docs,
            config,
        })
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    pub fn builder(&self, source: Source) -> &UrlBuilder {
        match source {
            Source::Lexicon => &self.lexicon,
            Source::SchemaDocs => &self.schema_docs,
        }
    }

    /// Build the trusted URL for `source` at `version`.
    ///
    /// `None` or an empty string selects the source's default version.
    pub fn build_url(&self, source: Source, version: Option<&str>) -> Result<Url> {
        self.builder(source).build(resolve_version(source, version))
    }

    /// Fetch `source` at `version`, from cache unless `refresh` is set.
    pub async fn fetch(
        &self,
        source: Source,
        version: Option<&str>,
        refresh: bool,
        cancel: &CancellationToken,
    ) -> Result<Document> {
        let version = resolve_version(source, version);
        let fetcher = HttpFetcher::new(self.builder(source), version, self.transport.clone())?
            .with_max_response_bytes(self.config.max_response_bytes)
            .with_timeout(self.config.fetch_timeout);

        debug!("Fetching {} {} from {}", source, version, fetcher.url());
        let key = fetcher.url().to_string();
        CachedFetcher::new(fetcher, self.cache.clone(), key)
            .fetch(cancel, refresh)
            .await
    }
}

fn resolve_version(source: Source, version: Option<&str>) -> &str {
    match version {
        Some(v) if !v.is_empty() => v,
        _ => source.default_version(),
    }
}

fn builder_for(source: Source) -> Result<UrlBuilder> {
    UrlBuilder::new(source.base_url(), source.path_suffix()).map_err(|e| FetchError::Config {
        message: format!("configuring {} URL: {}", source, e),
    })
}
