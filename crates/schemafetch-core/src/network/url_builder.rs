//! Origin-pinned URL construction.
//!
//! A [`UrlBuilder`] is created once from a trusted HTTPS base and a fixed
//! suffix. Every URL it builds is re-parsed and compared against the base's
//! origin before it is handed to the network layer.

use super::version::validate_version;
use crate::{FetchError, Result};
use tracing::warn;
use url::Url;

/// Builds fetch URLs by inserting a validated version between a trusted base
/// and a fixed path suffix.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: Url,
    suffix: String,
}

impl UrlBuilder {
    /// Create a builder from a base URL and path suffix.
    ///
    /// The base must parse, use the `https` scheme and carry a host.
    pub fn new(base_url: &str, suffix: impl Into<String>) -> Result<Self> {
        let base = Url::parse(base_url).map_err(FetchError::InvalidBaseUrl)?;
        if base.scheme() != "https" {
            return Err(FetchError::InsecureBaseUrl {
                scheme: base.scheme().to_string(),
            });
        }
        // The parser promotes the first path segment of `https:///path` to a
        // host, so the authority has to be checked on the raw string.
        if !has_authority(base_url) || base.host_str().map_or(true, str::is_empty) {
            return Err(FetchError::MissingHost);
        }
        Ok(Self {
            base,
            suffix: suffix.into(),
        })
    }

    /// Build the URL for `version`.
    pub fn build(&self, version: &str) -> Result<Url> {
        validate_version(version)?;

        let raw = format!("{}{}{}", self.base.as_str(), version, self.suffix);
        let url = Url::parse(&raw).map_err(FetchError::InvalidUrl)?;

        self.check_origin(&url)?;
        Ok(url)
    }

    fn check_origin(&self, url: &Url) -> Result<()> {
        if url.scheme() == self.base.scheme() && url.origin() == self.base.origin() {
            return Ok(());
        }
        let actual = url.origin().ascii_serialization();
        let expected = self.base.origin().ascii_serialization();
        warn!("Rejected URL with unexpected origin {} (want {})", actual, expected);
        Err(FetchError::UnexpectedOrigin { actual, expected })
    }
}

/// Whether `raw` spells out a non-empty authority after `scheme://`.
fn has_authority(raw: &str) -> bool {
    let Some((_, rest)) = raw.trim().split_once(':') else {
        return false;
    };
    let Some(authority) = rest.strip_prefix("//") else {
        return false;
    };
    !matches!(authority.chars().next(), None | Some('/' | '\\' | '?' | '#'))
}
