//! PDF text-extraction pipeline
//!
//! Given a remotely hosted PDF, produces page-indexed text (optionally
//! with bounding boxes), falling back to OCR when the document's
//! native text layer is empty, then archives the source PDF to
//! S3-compatible object storage and returns a public URL alongside the
//! extracted text.
//!
//! The HTTP layer is not part of this crate: an external router hands
//! a [`types::ExtractRequest`] to [`pipeline::Pipeline::process`] and
//! serializes the [`types::PipelineResult`] or
//! [`error::PipelineError`] payload it gets back.
//!
//! # Modules
//!
//! - `fetch`: remote PDF download
//! - `pdf`: native text extraction, page counting, rasterization,
//!   single-page slicing
//! - `ocr`: OCR fallback with bounded per-page fan-out
//! - `storage`: S3-compatible archival
//! - `pipeline`: the orchestrator tying the stages together

pub mod config;
pub mod error;
pub mod fetch;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod storage;
pub mod types;

pub use config::Config;
pub use error::{ErrorKind, PipelineError};
pub use pipeline::Pipeline;
pub use types::{ExtractRequest, ExtractionResult, FidelityMode, PageContent, PipelineResult};
