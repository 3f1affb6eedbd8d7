//! PDF document access
//!
//! Wraps the raw document bytes so blocking MuPDF work can share them
//! without copying. MuPDF documents are not thread-safe, so a fresh
//! document is opened from the buffer inside each blocking operation
//! and dropped when it finishes; no document handle ever crosses a
//! thread boundary.

mod raster;
mod slice;
mod text;

pub use raster::render_page_png;
pub use slice::slice_page;
pub use text::extract_native;

use std::sync::Arc;

use crate::error::{PipelineError, Result};

/// Immutable in-memory PDF bytes, cheap to clone into blocking tasks
#[derive(Clone)]
pub struct PdfBuffer {
    data: Arc<Vec<u8>>,
}

impl PdfBuffer {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.as_ref().clone()
    }

    /// Open a fresh MuPDF document for one blocking operation
    pub(crate) fn open(&self) -> Result<mupdf::Document> {
        mupdf::Document::from_bytes(&self.data, "application/pdf").map_err(Into::into)
    }
}

impl std::fmt::Debug for PdfBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfBuffer")
            .field("len", &self.data.len())
            .finish()
    }
}

/// Total page count of the document. Pure; parse faults only.
pub async fn page_count(buffer: &PdfBuffer) -> Result<u32> {
    let buffer = buffer.clone();

    tokio::task::spawn_blocking(move || {
        let doc = buffer.open()?;
        let count = doc.page_count()?;
        Ok(count as u32)
    })
    .await
    .map_err(|e| PipelineError::Parse(format!("Task join error: {}", e)))?
}

/// Map a 1-based page selector onto the document, or list every page.
///
/// `page = 0` and anything past the last page are rejected; a missing
/// selector expands to all pages.
pub(crate) fn resolve_pages(page: Option<u32>, total: u32) -> Result<Vec<u32>> {
    match page {
        Some(p) if p == 0 || p > total => Err(PipelineError::Parse(format!(
            "Page {} out of range (document has {} pages)",
            p, total
        ))),
        Some(p) => Ok(vec![p]),
        None => Ok((1..=total).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rejects_zero_and_past_end() {
        assert!(resolve_pages(Some(0), 3).is_err());
        assert!(resolve_pages(Some(4), 3).is_err());
    }

    #[test]
    fn resolve_single_and_all() {
        assert_eq!(resolve_pages(Some(2), 3).unwrap(), vec![2]);
        assert_eq!(resolve_pages(None, 3).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn page_count_rejects_garbage() {
        let buffer = PdfBuffer::new(b"not a pdf at all".to_vec());
        assert!(page_count(&buffer).await.is_err());
    }
}
