// src/pipeline/validate.rs

use std::collections::HashSet;

use lettre::message::Mailbox;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::storage::StateStorage;
use crate::utils::parse_page_url;

/// Validate configuration, mail settings and the site list without
/// touching the network.
pub async fn run_validate(config: &Config, storage: &dyn StateStorage) -> Result<()> {
    config.validate()?;
    log::info!("✓ Config OK");
    log::info!("    Keyword: {}", config.crawler.keyword);
    log::info!("    Timeout: {}s", config.crawler.timeout_secs);

    config.mail.validate()?;
    for (key, address) in [
        ("email_from", &config.mail.email_from),
        ("email_to", &config.mail.email_to),
    ] {
        address
            .parse::<Mailbox>()
            .map_err(|e| AppError::config(format!("invalid {key} '{address}': {e}")))?;
    }
    log::info!(
        "✓ Mail OK ({}:{} -> {})",
        config.mail.smtp_host,
        config.mail.smtp_port,
        config.mail.email_to
    );

    let sites = storage.load_sites().await?;
    if sites.is_empty() {
        return Err(AppError::validation("site list is empty"));
    }

    let mut seen = HashSet::new();
    for site in &sites {
        parse_page_url(&site.url)?;
        if site.scope_start.is_empty() || site.scope_end.is_empty() {
            return Err(AppError::validation(format!(
                "empty marker for {}",
                site.url
            )));
        }
        if !seen.insert(site.url.as_str()) {
            log::warn!("{} is listed more than once; the last entry wins", site.url);
        }
    }
    log::info!("✓ Site list OK ({} sites)", sites.len());

    Ok(())
}
