//! Version string validation.
//!
//! A version is spliced into a trusted URL, so only `v<major>.<minor>.<patch>`
//! with an optional `-<prerelease>` tag, or the literal `latest`, get through.

use crate::{FetchError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Literal accepted in place of a semver tag; the server resolves it to the
/// newest release.
pub const LATEST: &str = "latest";

static VALID_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(v[0-9]+\.[0-9]+\.[0-9]+(-[A-Za-z0-9_.]+)?|{})$",
        LATEST
    ))
    .expect("version regex must compile")
});

/// Check that `version` is semver with a `v` prefix (e.g. `v1.2.3`) or `latest`.
pub fn validate_version(version: &str) -> Result<()> {
    if VALID_VERSION_RE.is_match(version) {
        Ok(())
    } else {
        Err(FetchError::InvalidVersion {
            version: version.to_string(),
        })
    }
}
