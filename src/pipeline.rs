//! Pipeline orchestrator
//!
//! Sequences one request end to end: fetch, native extraction, OCR
//! fallback when the text layer is empty, archival upload, response
//! assembly. Dependencies are injected so tests can observe each
//! collaborator; the orchestrator itself holds no per-request state.

use std::sync::Arc;

use chrono::Utc;

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::ocr::{extract_ocr, OcrProvider, TesseractOcr};
use crate::pdf::{extract_native, slice_page, PdfBuffer};
use crate::storage::{storage_key, ObjectStore, S3Store};
use crate::types::{ExtractRequest, PageContent, PipelineResult};

/// The extraction pipeline with its collaborators
pub struct Pipeline {
    config: Config,
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn ObjectStore>,
    ocr: Arc<dyn OcrProvider>,
}

impl Pipeline {
    pub fn new(
        config: Config,
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn ObjectStore>,
        ocr: Arc<dyn OcrProvider>,
    ) -> Self {
        Self {
            config,
            fetcher,
            store,
            ocr,
        }
    }

    /// Wire up the production collaborators from configuration
    pub fn from_config(config: Config) -> Self {
        let fetcher = Arc::new(HttpFetcher::new());
        let store = Arc::new(S3Store::new(&config.storage));
        let ocr = Arc::new(TesseractOcr::new(&config.ocr.language));
        Self::new(config, fetcher, store, ocr)
    }

    /// Process one request: fetch, extract (with OCR fallback), archive.
    ///
    /// Emptiness policy: OCR runs only when the concatenation of ALL
    /// natively extracted text for the requested scope is blank. A
    /// document with native text on any in-scope page skips OCR.
    pub async fn process(&self, request: &ExtractRequest) -> Result<PipelineResult> {
        let url = request
            .pdf_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(PipelineError::MissingUrl)?;
        let page = request.page;

        tracing::debug!(url, ?page, "starting extraction pipeline");

        let bytes = self.fetcher.fetch(url).await?;
        let buffer = PdfBuffer::new(bytes);

        let (mut extracted, total_pages) =
            extract_native(&buffer, page, self.config.fidelity).await?;

        if extracted.values().all(PageContent::is_blank) {
            tracing::warn!(url, ?page, "native text layer empty, falling back to OCR");
            extracted = extract_ocr(
                &buffer,
                page,
                self.config.fidelity,
                Arc::clone(&self.ocr),
                &self.config.ocr,
            )
            .await?;
        }

        if extracted.values().all(PageContent::is_blank) {
            return Err(PipelineError::NoTextFound);
        }

        let key = storage_key(Utc::now(), page);
        self.store.ensure_bucket().await?;

        let upload_bytes = match page {
            Some(n) => {
                let buffer = buffer.clone();
                tokio::task::spawn_blocking(move || slice_page(buffer.bytes(), n))
                    .await
                    .map_err(|e| PipelineError::Upload(format!("Task join error: {}", e)))??
            }
            None => buffer.to_vec(),
        };

        self.store
            .put_object(&key, upload_bytes, "application/pdf")
            .await?;
        let file_url = self.store.object_url(&key);

        tracing::info!(url, key = %key, total_pages, "extraction pipeline complete");

        Ok(PipelineResult {
            extracted_text: extracted,
            file_url,
            total_pages: Some(total_pages),
        })
    }
}
