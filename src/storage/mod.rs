//! Storage abstractions for monitor state.
//!
//! All state lives in small line-oriented files next to each other:
//!
//! ```text
//! {storage_dir}/
//! ├── jobwatch.conf         # Key-value configuration
//! ├── career_pages.cdf      # Site list: url,start,end
//! ├── sites.data            # Signature store: url,fingerprint,marker
//! ├── sendmail.text         # Changed sites of the last run
//! └── stats.json            # Statistics of the last run
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{RunStats, SignatureStore, SiteEntry};

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a signature store write.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of records written
    pub record_count: usize,
    /// Where the records were written
    pub location: String,
}

/// Trait for monitor state backends.
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Load the configured site list. A missing list is an error.
    async fn load_sites(&self) -> Result<Vec<SiteEntry>>;

    /// Load the signature store. A missing store is an empty store.
    async fn load_signatures(&self) -> Result<SignatureStore>;

    /// Replace the signature store with `store`.
    async fn save_signatures(&self, store: &SignatureStore) -> Result<WriteMetadata>;

    /// Replace the alert file with the changed identifiers.
    async fn write_alert(&self, changed: &[String]) -> Result<()>;

    /// Persist statistics of the last run.
    async fn write_stats(&self, stats: &RunStats) -> Result<()>;

    /// Load statistics of the last run, if any.
    async fn load_stats(&self) -> Result<Option<RunStats>>;
}
