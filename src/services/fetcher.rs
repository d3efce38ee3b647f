// src/services/fetcher.rs

//! Page retrieval service.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::CrawlerConfig;
use crate::utils::http;

/// Retrieves the raw bytes of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`, or fail if the page is unavailable within the timeout.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetches pages over HTTP(S) with a bounded timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured user agent and timeout.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("Fetching {}", url);
        http::fetch_bytes(&self.client, url).await
    }
}
