//! OCR fallback orchestration
//!
//! Rasterizes the relevant pages and runs the OCR provider on each.
//! For whole-document requests the per-page jobs run concurrently,
//! capped by a semaphore, and are gathered in page-index order
//! regardless of completion order.

use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::Semaphore;

use crate::config::OcrConfig;
use crate::error::{PipelineError, Result};
use crate::pdf::{self, render_page_png, PdfBuffer};
use crate::types::{ExtractionResult, FidelityMode, PageContent};

use super::OcrProvider;

/// Run the OCR fallback for the requested scope.
///
/// Produces the same page-indexed shape as native extraction. In
/// bounding-box mode the spans are in pixel space of the rendered
/// raster, not PDF page coordinates.
pub async fn extract_ocr(
    buffer: &PdfBuffer,
    page: Option<u32>,
    mode: FidelityMode,
    provider: Arc<dyn OcrProvider>,
    config: &OcrConfig,
) -> Result<ExtractionResult> {
    let total = pdf::page_count(buffer).await?;
    let pages = pdf::resolve_pages(page, total)?;

    let semaphore = Arc::new(Semaphore::new(config.max_concurrency));
    let scale = config.render_scale;

    let jobs = pages.into_iter().map(|page_number| {
        let buffer = buffer.clone();
        let provider = Arc::clone(&provider);
        let semaphore = Arc::clone(&semaphore);

        async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| PipelineError::Ocr(format!("Semaphore closed: {}", e)))?;

            let (png, _, _) = tokio::task::spawn_blocking(move || {
                render_page_png(&buffer, page_number, scale)
            })
            .await
            .map_err(|e| PipelineError::Ocr(format!("Task join error: {}", e)))??;

            let content = match mode {
                FidelityMode::Plain => PageContent::Text(provider.recognize_text(&png).await?),
                FidelityMode::BoundingBoxes => {
                    PageContent::Spans(provider.recognize_words(&png).await?)
                }
            };

            Ok::<(u32, PageContent), PipelineError>((page_number, content))
        }
    });

    // try_join_all yields results in input order, so the map comes out
    // page-ascending no matter which job finishes first.
    let results = try_join_all(jobs).await?;
    Ok(results.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::types::TextSpan;

    struct FixedOcr {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OcrProvider for FixedOcr {
        async fn recognize_text(&self, _image_png: &[u8]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("scanned".to_string())
        }

        async fn recognize_words(&self, _image_png: &[u8]) -> Result<Vec<TextSpan>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn garbage_document_fails_before_any_recognition() {
        let provider = Arc::new(FixedOcr {
            calls: AtomicUsize::new(0),
        });
        let buffer = PdfBuffer::new(b"nope".to_vec());

        let err = extract_ocr(
            &buffer,
            None,
            FidelityMode::Plain,
            provider.clone(),
            &OcrConfig::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
