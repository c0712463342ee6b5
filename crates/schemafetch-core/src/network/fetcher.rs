//! Size-bounded document fetching over HTTPS.

use super::client::RetryTransport;
use super::url_builder::UrlBuilder;
use crate::cancel::CancellationToken;
use crate::config::NetworkConfig;
use crate::{FetchError, Result};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::{Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Raw document bytes plus the URL they were fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub payload: Bytes,
    /// Source identifier: the fully resolved URL that was fetched.
    pub source: String,
}

/// Anything that can produce a document on demand.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieve the document and its source identifier.
    async fn fetch(&self, cancel: &CancellationToken) -> Result<Document>;
}

/// Fetches one fixed URL with a single GET through a [`RetryTransport`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    url: Url,
    transport: Arc<RetryTransport>,
    /// Body cap in bytes; zero means [`NetworkConfig::MAX_RESPONSE_BYTES`].
    max_response_bytes: u64,
    /// Overall deadline, retries included.
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher for `version` of the source behind `builder`.
    pub fn new(builder: &UrlBuilder, version: &str, transport: Arc<RetryTransport>) -> Result<Self> {
        let url = builder
            .build(version)
            .map_err(|e| FetchError::BuildUrl(Box::new(e)))?;
        Ok(Self::with_url(url, transport))
    }

    /// Create a fetcher for an already trusted URL.
    pub(crate) fn with_url(url: Url, transport: Arc<RetryTransport>) -> Self {
        Self {
            url,
            transport,
            max_response_bytes: 0,
            timeout: NetworkConfig::FETCH_TIMEOUT,
        }
    }

    /// Override the body cap. Zero restores the default.
    pub fn with_max_response_bytes(mut self, bytes: u64) -> Self {
        self.max_response_bytes = bytes;
        self
    }

    /// Override the overall deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The resolved fetch URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn response_limit(&self) -> u64 {
        if self.max_response_bytes == 0 {
            NetworkConfig::MAX_RESPONSE_BYTES
        } else {
            self.max_response_bytes
        }
    }

    async fn fetch_once(&self, cancel: &CancellationToken) -> Result<Document> {
        let response = self.transport.get(&self.url, cancel).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                method: "GET".to_string(),
                url: response.url().to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let payload = read_limited(response, self.response_limit(), cancel).await?;
        debug!("Fetched {} bytes from {}", payload.len(), self.url);

        Ok(Document {
            payload,
            source: self.url.to_string(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, cancel: &CancellationToken) -> Result<Document> {
        match tokio::time::timeout(self.timeout, self.fetch_once(cancel)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }
}

/// Read at most `limit` bytes of the body; anything beyond is dropped.
async fn read_limited(response: Response, limit: u64, cancel: &CancellationToken) -> Result<Bytes> {
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let url = response.url().clone();
    let mut stream = response.bytes_stream();
    let mut body = BytesMut::new();

    loop {
        let next = tokio::select! {
            chunk = stream.next() => chunk,
            _ = cancel.cancelled() => return Err(FetchError::Cancelled),
        };
        let Some(chunk) = next else {
            break;
        };
        let chunk = chunk.map_err(FetchError::ReadBody)?;

        let remaining = limit - body.len();
        if chunk.len() > remaining {
            body.extend_from_slice(&chunk[..remaining]);
            warn!("Response from {} exceeds {} bytes; truncating", url, limit);
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body.freeze())
}
