// src/models/stats.rs

//! Per-run statistics written next to the signature store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a monitor run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub site_count: usize,
    pub fetch_failures: usize,
    pub changed_count: usize,
    pub new_count: usize,
    /// Whether an alert mail was handed to the mail server
    pub notified: bool,
}

impl RunStats {
    pub fn duration_secs(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}
