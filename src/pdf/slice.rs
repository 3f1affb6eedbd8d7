//! Single-page slicing for archival
//!
//! When a page selector accompanies the request, only that page is
//! archived: a minimal one-page PDF is re-encoded from the source
//! buffer. lopdf does the subset work since MuPDF's Rust binding has
//! no document-subset writer. Blocking; callers run this under
//! `spawn_blocking`.

use lopdf::Document;

use crate::error::{PipelineError, Result};

/// Re-encode `bytes` as a new PDF containing only `page` (1-based).
pub fn slice_page(bytes: &[u8], page: u32) -> Result<Vec<u8>> {
    let mut doc =
        Document::load_mem(bytes).map_err(|e| PipelineError::Parse(e.to_string()))?;

    let pages = doc.get_pages();
    if page == 0 || !pages.contains_key(&page) {
        return Err(PipelineError::Parse(format!(
            "Page {} out of range (document has {} pages)",
            page,
            pages.len()
        )));
    }

    let others: Vec<u32> = pages.keys().copied().filter(|&n| n != page).collect();
    if !others.is_empty() {
        doc.delete_pages(&others);
    }
    doc.prune_objects();
    doc.renumber_objects();
    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| PipelineError::Upload(format!("Failed to encode page slice: {}", e)))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_input_is_a_parse_error() {
        let err = slice_page(b"definitely not a pdf", 1).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
    }
}
