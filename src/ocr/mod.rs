//! OCR fallback extraction
//!
//! Invoked when the native text layer is empty for the requested
//! scope. Pages are rasterized and recognized independently under a
//! bounded fan-out, then gathered back in page-index order.

mod extractor;
mod provider;

pub use extractor::extract_ocr;
pub use provider::{OcrProvider, TesseractOcr};
