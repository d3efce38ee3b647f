//! Local filesystem storage implementation.
//!
//! Every write replaces the target file as a whole: the new content goes to
//! a temporary sibling which is then renamed over the target.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{PathsConfig, RunStats, SignatureStore, SiteEntry, parse_site_list};
use crate::storage::{StateStorage, WriteMetadata};
use crate::utils::resolve_path;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    paths: PathsConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, paths: PathsConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            paths,
        }
    }

    /// Get the full path for a configured file.
    pub fn path(&self, file: &Path) -> PathBuf {
        resolve_path(&self.root_dir, file)
    }

    pub fn sites_path(&self) -> PathBuf {
        self.path(&self.paths.sites_file)
    }

    pub fn store_path(&self) -> PathBuf {
        self.path(&self.paths.store_file)
    }

    pub fn alert_path(&self) -> PathBuf {
        self.path(&self.paths.alert_file)
    }

    pub fn stats_path(&self) -> PathBuf {
        self.path(&self.paths.stats_file)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.ensure_dir(path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Write records, each terminated by a newline.
    async fn write_lines(&self, path: &Path, lines: &[String]) -> Result<()> {
        let mut content = String::new();
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        self.write_bytes(path, content.as_bytes()).await
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(path, &bytes).await
    }

    /// Read text, returning None if the file doesn't exist.
    async fn read_text(&self, path: &Path) -> Result<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        match self.read_text(path).await? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl StateStorage for LocalStorage {
    async fn load_sites(&self) -> Result<Vec<SiteEntry>> {
        let path = self.sites_path();
        match self.read_text(&path).await? {
            Some(text) => parse_site_list(&text, &path.display().to_string()),
            None => Err(AppError::config(format!(
                "Site list not found at {}",
                path.display()
            ))),
        }
    }

    async fn load_signatures(&self) -> Result<SignatureStore> {
        let path = self.store_path();
        match self.read_text(&path).await? {
            Some(text) => SignatureStore::parse(&text, &path.display().to_string()),
            None => {
                log::info!(
                    "No signature store at {}, starting empty",
                    path.display()
                );
                Ok(SignatureStore::new())
            }
        }
    }

    async fn save_signatures(&self, store: &SignatureStore) -> Result<WriteMetadata> {
        let path = self.store_path();
        self.write_lines(&path, &store.to_lines()).await?;

        Ok(WriteMetadata {
            record_count: store.len(),
            location: path.display().to_string(),
        })
    }

    async fn write_alert(&self, changed: &[String]) -> Result<()> {
        self.write_lines(&self.alert_path(), changed).await
    }

    async fn write_stats(&self, stats: &RunStats) -> Result<()> {
        self.write_json(&self.stats_path(), stats).await
    }

    async fn load_stats(&self) -> Result<Option<RunStats>> {
        self.read_json(&self.stats_path()).await
    }
}
