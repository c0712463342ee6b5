//! JSON output for `fetch --json`.

use schemafetch_core::{Document, Source};
use serde::Serialize;

/// Envelope describing a fetched document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FetchOutput<'a> {
    pub source: &'a str,
    pub url: &'a str,
    pub bytes: usize,
    /// Document text; invalid UTF-8 is replaced.
    pub content: String,
}

impl<'a> FetchOutput<'a> {
    pub fn new(source: Source, doc: &'a Document) -> Self {
        Self {
            source: source.as_str(),
            url: &doc.source,
            bytes: doc.payload.len(),
            content: String::from_utf8_lossy(&doc.payload).into_owned(),
        }
    }
}

/// Serialize `doc` as a pretty JSON envelope followed by a newline.
pub fn json_envelope(source: Source, doc: &Document) -> serde_json::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(&FetchOutput::new(source, doc))?;
    bytes.push(b'\n');
    Ok(bytes)
}
