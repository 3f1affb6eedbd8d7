//! Remote PDF fetching
//!
//! Downloads the source document into memory. Single attempt: any
//! transport error or non-2xx status is fatal to the request.

use async_trait::async_trait;

use crate::error::{PipelineError, Result};

/// Fetches a remote document body into an in-memory buffer
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP fetcher backed by a shared reqwest client
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::Download(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| PipelineError::Download(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PipelineError::Download(e.to_string()))?;

        tracing::debug!(url, size = bytes.len(), "downloaded PDF");
        Ok(bytes.to_vec())
    }
}
