//! Native text-layer extraction
//!
//! Reads the PDF's internal text layer via MuPDF, either as one string
//! per page or as per-line spans with bounding boxes. Bounding boxes
//! stay in the page's native coordinate space.

use mupdf::TextPageOptions;

use crate::error::{PipelineError, Result};
use crate::types::{BBox, ExtractionResult, FidelityMode, PageContent, TextSpan};

use super::{resolve_pages, PdfBuffer};

/// Extract the native text layer for the requested scope.
///
/// Returns the page-indexed content plus the document's total page
/// count. A 1-based `page` selector narrows extraction to that page;
/// out-of-range selectors (including 0) fail with a parse error.
pub async fn extract_native(
    buffer: &PdfBuffer,
    page: Option<u32>,
    mode: FidelityMode,
) -> Result<(ExtractionResult, u32)> {
    let buffer = buffer.clone();

    tokio::task::spawn_blocking(move || {
        let doc = buffer.open()?;
        let total = doc.page_count()? as u32;
        let pages = resolve_pages(page, total)?;

        let mut extracted = ExtractionResult::new();
        for page_number in pages {
            let page = doc.load_page((page_number - 1) as i32)?;
            let content = match mode {
                FidelityMode::Plain => PageContent::Text(page.to_text()?),
                FidelityMode::BoundingBoxes => PageContent::Spans(extract_spans(&page)?),
            };
            extracted.insert(page_number, content);
        }

        Ok((extracted, total))
    })
    .await
    .map_err(|e| PipelineError::Parse(format!("Task join error: {}", e)))?
}

/// Walk the structured text tree and emit one span per line.
///
/// MuPDF's Rust binding exposes block -> line -> char; each line's
/// chars are merged into a single span whose bbox is the union of the
/// char quads. The structured-text iterator only yields text blocks,
/// so images and vector drawings never appear here.
fn extract_spans(page: &mupdf::Page) -> Result<Vec<TextSpan>> {
    let text_page = page.to_text_page(TextPageOptions::PRESERVE_WHITESPACE)?;

    let mut spans = Vec::new();
    for block in text_page.blocks() {
        for line in block.lines() {
            let mut text = String::new();
            let mut bbox: Option<BBox> = None;

            for ch in line.chars() {
                if let Some(c) = ch.char() {
                    let quad = ch.quad();
                    let char_box = BBox::new(
                        quad.ul.x.min(quad.ll.x),
                        quad.ul.y.min(quad.ur.y),
                        quad.ur.x.max(quad.lr.x),
                        quad.ll.y.max(quad.lr.y),
                    );

                    text.push(c);
                    bbox = Some(match bbox {
                        Some(b) => b.union(&char_box),
                        None => char_box,
                    });
                }
            }

            if !text.trim().is_empty() {
                if let Some(bbox) = bbox {
                    spans.push(TextSpan { text, bbox });
                }
            }
        }
    }

    Ok(spans)
}
