// src/pipeline/notify.rs

//! Alert notification for changed sites.

use crate::error::Result;
use crate::services::{Mailer, OutgoingMail};

/// Subject line of every alert mail.
pub const ALERT_SUBJECT: &str = "Jobs monitor alert";

/// Whether an alert was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    Skipped,
}

/// Sends the list of changed sites to a fixed recipient.
pub struct Notifier<'a> {
    mailer: &'a dyn Mailer,
    recipient: String,
}

impl<'a> Notifier<'a> {
    pub fn new(mailer: &'a dyn Mailer, recipient: impl Into<String>) -> Self {
        Self {
            mailer,
            recipient: recipient.into(),
        }
    }

    /// Mail the changed identifiers, one per line. Nothing is sent for an
    /// empty list. Delivery failures are returned to the caller.
    pub async fn notify(&self, changed: &[String]) -> Result<NotifyOutcome> {
        if changed.is_empty() {
            log::info!("No changes, no alert sent");
            return Ok(NotifyOutcome::Skipped);
        }

        let mail = OutgoingMail {
            to: self.recipient.clone(),
            subject: ALERT_SUBJECT.to_string(),
            body: alert_body(changed),
        };
        self.mailer.deliver(&mail).await?;

        log::info!(
            "Alert for {} changed site(s) sent to {}",
            changed.len(),
            self.recipient
        );
        Ok(NotifyOutcome::Sent)
    }
}

/// One identifier per line.
pub fn alert_body(changed: &[String]) -> String {
    let mut body = String::new();
    for id in changed {
        body.push_str(id);
        body.push('\n');
    }
    body
}
