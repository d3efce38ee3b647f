//! Application configuration structures.
//!
//! The configuration file holds one `key value` pair per line. Lines that
//! start with `#` are comments and lines without a value are skipped.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Locations of the record files
    pub paths: PathsConfig,

    /// Fetching and fingerprinting behavior
    pub crawler: CrawlerConfig,

    /// Outbound mail settings
    pub mail: MailConfig,
}

impl Config {
    /// Load configuration from a key-value file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration, falling back to defaults when the file is missing.
    ///
    /// A file that exists but holds an invalid value is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(&path) {
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!(
                    "Config not found at {:?}. Using defaults.",
                    path.as_ref()
                );
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse configuration text on top of the defaults.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim_end_matches('\r');
            if line.starts_with('#') {
                continue;
            }
            // The value is the rest of the line after a single space.
            let Some((key, value)) = line.split_once(' ') else {
                continue;
            };
            if key.is_empty() || value.is_empty() || value.starts_with(' ') {
                continue;
            }

            if !config.set(key, value)? {
                log::warn!("Ignoring unknown config key '{}'", key);
            }
        }

        Ok(config)
    }

    /// Apply a single setting. Returns `false` for unknown keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        match key {
            "smtp_host" => self.mail.smtp_host = value.to_string(),
            "smtp_port" => self.mail.smtp_port = parse_value(key, value)?,
            "smtp_user" => self.mail.smtp_user = value.to_string(),
            "smtp_pass" => self.mail.smtp_pass = value.to_string(),
            "email_from" => self.mail.email_from = value.to_string(),
            "email_to" => self.mail.email_to = value.to_string(),
            "keyword" => self.crawler.keyword = value.to_string(),
            "timeout_secs" => self.crawler.timeout_secs = parse_value(key, value)?,
            "user_agent" => self.crawler.user_agent = value.to_string(),
            "sites_file" => self.paths.sites_file = value.into(),
            "store_file" => self.paths.store_file = value.into(),
            "alert_file" => self.paths.alert_file = value.into(),
            "stats_file" => self.paths.stats_file = value.into(),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Validate configuration values needed to detect changes.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("timeout_secs must be > 0"));
        }
        if self.crawler.keyword.is_empty() {
            return Err(AppError::validation("keyword is empty"));
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim_end()
        .parse()
        .map_err(|e| AppError::config(format!("invalid value '{value}' for {key}: {e}")))
}

/// Record file locations. Relative paths resolve against the storage directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Site list: `url,startMarker,endMarker` per line
    pub sites_file: PathBuf,

    /// Signature store: `identifier,fingerprint,marker` per line
    pub store_file: PathBuf,

    /// Changed identifiers of the last run
    pub alert_file: PathBuf,

    /// JSON statistics of the last run
    pub stats_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sites_file: defaults::sites_file(),
            store_file: defaults::store_file(),
            alert_file: defaults::alert_file(),
            stats_file: defaults::stats_file(),
        }
    }
}

/// Page retrieval and fingerprinting settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Keyword whose occurrences define the fingerprint
    pub keyword: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            keyword: defaults::keyword(),
        }
    }
}

/// SMTP relay and addressing for alert mails.
#[derive(Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub email_from: String,
    pub email_to: String,
}

impl MailConfig {
    /// Check that every setting needed to deliver an alert is present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("smtp_host", &self.smtp_host),
            ("email_from", &self.email_from),
            ("email_to", &self.email_to),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::config(format!("{key} is not set")));
            }
        }
        if self.smtp_port == 0 {
            return Err(AppError::config("smtp_port must be > 0"));
        }
        Ok(())
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: defaults::smtp_port(),
            smtp_user: String::new(),
            smtp_pass: String::new(),
            email_from: String::new(),
            email_to: String::new(),
        }
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_pass", &"<redacted>")
            .field("email_from", &self.email_from)
            .field("email_to", &self.email_to)
            .finish()
    }
}

mod defaults {
    use std::path::PathBuf;

    // Path defaults
    pub fn sites_file() -> PathBuf {
        "career_pages.cdf".into()
    }
    pub fn store_file() -> PathBuf {
        "sites.data".into()
    }
    pub fn alert_file() -> PathBuf {
        "sendmail.text".into()
    }
    pub fn stats_file() -> PathBuf {
        "stats.json".into()
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; jobwatch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        4
    }
    pub fn keyword() -> String {
        "Engineer".into()
    }

    // Mail defaults
    pub fn smtp_port() -> u16 {
        465
    }
}
