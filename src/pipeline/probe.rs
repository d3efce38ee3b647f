// src/pipeline/probe.rs

//! Diagnostics for tuning markers and keywords.

use std::path::Path;

use crate::error::Result;
use crate::pipeline::{extract, fingerprint};
use crate::services::PageFetcher;

/// Fetch `url` and return the raw focus window between `begin` and `end`.
///
/// Unlike a monitor run, a fetch failure is reported to the caller.
pub async fn run_probe(
    fetcher: &dyn PageFetcher,
    url: &str,
    begin: &str,
    end: &str,
) -> Result<Vec<u8>> {
    let page = fetcher.fetch(url).await?;
    let window = extract(&page, begin.as_bytes(), end.as_bytes());
    if window.is_empty() {
        log::warn!("Markers not found in order on {}", url);
    }
    Ok(window.to_vec())
}

/// Fingerprint the raw contents of a saved focus window.
pub async fn run_fingerprint_file(path: &Path, keyword: &str) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(fingerprint(&bytes, keyword.as_bytes()))
}
