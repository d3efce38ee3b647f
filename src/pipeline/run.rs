// src/pipeline/run.rs

//! Full detect-and-notify run.

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, RunStats};
use crate::pipeline::{ChangeDetector, Notifier, NotifyOutcome};
use crate::services::{Mailer, PageFetcher};
use crate::storage::StateStorage;

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub changed: Vec<String>,
    pub stats: RunStats,
    pub notify: NotifyOutcome,
}

/// Run the monitor once.
///
/// The signature store and alert file are written before the alert mail is
/// sent, so a delivery failure never loses detection state.
pub async fn run_monitor(
    config: &Config,
    storage: &dyn StateStorage,
    fetcher: &dyn PageFetcher,
    mailer: &dyn Mailer,
) -> Result<RunReport> {
    let started_at = Utc::now();
    log::info!("Monitor run starting...");

    let sites = storage.load_sites().await?;
    let previous = storage.load_signatures().await?;
    log::info!(
        "Loaded {} sites and {} stored signatures",
        sites.len(),
        previous.len()
    );

    let detector = ChangeDetector::new(fetcher, config.crawler.keyword.as_str());
    let detection = detector.run(&sites, &previous).await;

    let written = storage.save_signatures(&detection.store).await?;
    log::info!(
        "Saved {} signatures to {}",
        written.record_count,
        written.location
    );
    storage.write_alert(&detection.changed).await?;

    let notifier = Notifier::new(mailer, config.mail.email_to.as_str());
    let notified = notifier.notify(&detection.changed).await;

    let stats = RunStats {
        started_at,
        finished_at: Utc::now(),
        site_count: sites.len(),
        fetch_failures: detection.fetch_failures(),
        changed_count: detection.changed.len(),
        new_count: detection.new_count(),
        notified: matches!(notified, Ok(NotifyOutcome::Sent)),
    };
    storage.write_stats(&stats).await?;

    let notify = notified?;
    log::info!(
        "Run complete: {} sites, {} changed, {} new, {} unreachable",
        stats.site_count,
        stats.changed_count,
        stats.new_count,
        stats.fetch_failures
    );

    Ok(RunReport {
        changed: detection.changed,
        stats,
        notify,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::error::AppError;
    use crate::models::{Signature, SignatureStore};
    use crate::pipeline::detect::tests::FakeFetcher;
    use crate::pipeline::notify::tests::RecordingMailer;
    use crate::storage::LocalStorage;

    fn setup(sites: &str) -> (TempDir, Config, LocalStorage) {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.mail.email_to = "me@example.com".to_string();
        let storage = LocalStorage::new(tmp.path(), config.paths.clone());
        std::fs::write(storage.sites_path(), sites).unwrap();
        (tmp, config, storage)
    }

    #[tokio::test]
    async fn test_runs_persist_state_and_alert_on_change() {
        let (_tmp, config, storage) = setup("http://x,<h1>,<footer>\n");
        let mailer = RecordingMailer::default();

        let page = FakeFetcher::default().with_page("http://x", "<h1>AEngineerBEngineerC<footer>");
        let first = run_monitor(&config, &storage, &page, &mailer).await.unwrap();
        assert!(first.changed.is_empty());
        assert_eq!(first.notify, NotifyOutcome::Skipped);
        assert_eq!(first.stats.new_count, 1);
        assert_eq!(
            std::fs::read_to_string(storage.store_path()).unwrap(),
            "http://x,1_,0\n"
        );

        let second = run_monitor(&config, &storage, &page, &mailer).await.unwrap();
        assert!(second.changed.is_empty());
        assert!(mailer.sent().is_empty());

        let shifted =
            FakeFetcher::default().with_page("http://x", "<h1>AEngineerBBBEngineerC<footer>");
        let third = run_monitor(&config, &storage, &shifted, &mailer).await.unwrap();
        assert_eq!(third.changed, vec!["http://x"]);
        assert_eq!(third.notify, NotifyOutcome::Sent);

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "me@example.com");
        assert_eq!(sent[0].body, "http://x\n");
        assert_eq!(
            std::fs::read_to_string(storage.alert_path()).unwrap(),
            "http://x\n"
        );

        let stats = storage.load_stats().await.unwrap().unwrap();
        assert_eq!(stats.changed_count, 1);
        assert!(stats.notified);
    }

    #[tokio::test]
    async fn test_delivery_failure_keeps_saved_state() {
        let (_tmp, config, storage) = setup("http://x,<h1>,<footer>\n");
        let previous: SignatureStore = [("http://x", Signature::fresh("9_"))].into_iter().collect();
        storage.save_signatures(&previous).await.unwrap();

        let page = FakeFetcher::default().with_page("http://x", "<h1>AEngineerBEngineerC<footer>");
        let mailer = RecordingMailer::failing();
        let result = run_monitor(&config, &storage, &page, &mailer).await;

        assert!(matches!(result, Err(AppError::Mail(_))));
        assert_eq!(
            storage.load_signatures().await.unwrap().get("http://x"),
            Some(&Signature::fresh("1_"))
        );
        let stats = storage.load_stats().await.unwrap().unwrap();
        assert_eq!(stats.changed_count, 1);
        assert!(!stats.notified);
    }

    #[tokio::test]
    async fn test_malformed_store_aborts_before_fetching() {
        let (_tmp, config, storage) = setup("http://x,<h1>,<footer>\n");
        std::fs::write(storage.store_path(), "http://x;1_;0\n").unwrap();

        let page = FakeFetcher::default();
        let mailer = RecordingMailer::default();
        let result = run_monitor(&config, &storage, &page, &mailer).await;

        assert!(matches!(result, Err(AppError::Parse { .. })));
        assert!(!storage.alert_path().exists());
    }
}
