// src/pipeline/detect.rs

//! Change detection against the stored signatures.
//!
//! Each configured site is fetched, narrowed to its focus window and
//! fingerprinted, then compared with the fingerprint recorded by the
//! previous run. The previous store is only read; a fresh store holding the
//! new fingerprints of exactly the configured sites is returned.

use crate::models::{Signature, SignatureStore, SiteEntry};
use crate::pipeline::{extract, fingerprint};
use crate::services::PageFetcher;

/// Classification of a site against the previous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    /// No previous fingerprint to compare against
    New,
    /// Fingerprint equals the stored one
    Unchanged,
    /// Fingerprint differs from the stored one
    Changed,
}

/// Result of evaluating a single site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOutcome {
    pub url: String,
    pub fingerprint: String,
    pub status: SiteStatus,
    /// The page could not be retrieved and was treated as empty
    pub fetch_failed: bool,
}

/// Result of one detection pass.
#[derive(Debug, Clone, Default)]
pub struct Detection {
    /// Signatures to persist
    pub store: SignatureStore,
    /// Changed site identifiers, in site list order
    pub changed: Vec<String>,
    /// Per-site results, in site list order
    pub outcomes: Vec<SiteOutcome>,
}

impl Detection {
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    pub fn fetch_failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.fetch_failed).count()
    }

    pub fn new_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == SiteStatus::New)
            .count()
    }
}

/// Compares freshly computed fingerprints with the stored ones.
pub struct ChangeDetector<'a> {
    fetcher: &'a dyn PageFetcher,
    keyword: String,
}

impl<'a> ChangeDetector<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, keyword: impl Into<String>) -> Self {
        Self {
            fetcher,
            keyword: keyword.into(),
        }
    }

    /// Evaluate every site in order against `previous`.
    ///
    /// Fetch failures are logged and the page is treated as empty; they never
    /// abort the pass.
    pub async fn run(&self, sites: &[SiteEntry], previous: &SignatureStore) -> Detection {
        let mut detection = Detection::default();

        for site in sites {
            let (page, fetch_failed) = match self.fetcher.fetch(&site.url).await {
                Ok(page) => (page, false),
                Err(e) => {
                    log::warn!("{} down, treating as empty: {}", site.url, e);
                    (Vec::new(), true)
                }
            };

            let window = extract(
                &page,
                site.scope_start.as_bytes(),
                site.scope_end.as_bytes(),
            );
            if window.is_empty() && !fetch_failed {
                log::debug!("{}: focus window not found", site.url);
            }

            let fp = fingerprint(window, self.keyword.as_bytes());
            let status = classify(previous, &site.url, &fp);
            log::debug!("{}: fingerprint '{}' ({:?})", site.url, fp, status);

            if status == SiteStatus::Changed {
                log::info!("Change detected: {}", site.url);
                detection.changed.push(site.url.clone());
            }

            detection
                .store
                .insert(site.url.clone(), Signature::fresh(fp.clone()));
            detection.outcomes.push(SiteOutcome {
                url: site.url.clone(),
                fingerprint: fp,
                status,
                fetch_failed,
            });
        }

        detection
    }
}

/// Classify a fingerprint against the stored signature of `url`.
pub fn classify(previous: &SignatureStore, url: &str, fingerprint: &str) -> SiteStatus {
    match previous.get(url) {
        None => SiteStatus::New,
        Some(sig) if sig.fingerprint == fingerprint => SiteStatus::Unchanged,
        Some(_) => SiteStatus::Changed,
    }
}
