//! Service layer for the monitor.
//!
//! This module contains the collaborators around the detection pipeline:
//! - Page retrieval (`PageFetcher`, `HttpFetcher`)
//! - Mail delivery (`Mailer`, `SmtpMailer`)

mod fetcher;
mod mailer;

pub use fetcher::{HttpFetcher, PageFetcher};
pub use mailer::{Mailer, OutgoingMail, SmtpMailer};
