// src/models/mod.rs

//! Domain models for the monitor.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod signature;
mod site;
mod stats;

// Re-export all public types
pub use config::{Config, CrawlerConfig, MailConfig, PathsConfig};
pub use signature::{FRESH_MARKER, Signature, SignatureStore};
pub use site::{SiteEntry, parse_site_list};
pub use stats::RunStats;
