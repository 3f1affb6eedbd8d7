//! Pipeline error types
//!
//! One variant per failure stage. The external HTTP layer maps these to
//! status codes via [`PipelineError::status`] and serializes the
//! `{ "error": message }` payload via [`PipelineError::to_payload`].

use serde::Serialize;
use thiserror::Error;

/// Unified pipeline error type
#[derive(Debug, Error)]
pub enum PipelineError {
    /// PDF download failed (transport error or non-2xx status)
    #[error("Failed to download PDF: {0}")]
    Download(String),

    /// Document structure could not be parsed, or page index out of range
    #[error("Parse error: {0}")]
    Parse(String),

    /// Rasterization or OCR engine fault
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Storage credentials rejected
    #[error("Credentials not found: {0}")]
    Credentials(String),

    /// Storage fault other than credentials
    #[error("Error uploading file to storage: {0}")]
    Upload(String),

    /// Document is well-formed but has no extractable text at all
    #[error("No text found in the PDF")]
    NoTextFound,

    /// Request carried no PDF URL
    #[error("No PDF URL provided")]
    MissingUrl,
}

/// Stage discriminant, stable for tests and structured clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Download,
    Parse,
    Ocr,
    Credentials,
    Upload,
    NoTextFound,
    MissingUrl,
}

/// Serializable error payload, `{ "error": "...", "kind": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub error: String,
    pub kind: ErrorKind,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Download(_) => ErrorKind::Download,
            PipelineError::Parse(_) => ErrorKind::Parse,
            PipelineError::Ocr(_) => ErrorKind::Ocr,
            PipelineError::Credentials(_) => ErrorKind::Credentials,
            PipelineError::Upload(_) => ErrorKind::Upload,
            PipelineError::NoTextFound => ErrorKind::NoTextFound,
            PipelineError::MissingUrl => ErrorKind::MissingUrl,
        }
    }

    /// HTTP status the external layer should answer with
    pub fn status(&self) -> u16 {
        match self {
            PipelineError::NoTextFound | PipelineError::MissingUrl => 400,
            _ => 500,
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: self.to_string(),
            kind: self.kind(),
        }
    }
}

impl From<mupdf::Error> for PipelineError {
    fn from(err: mupdf::Error) -> Self {
        PipelineError::Parse(err.to_string())
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(PipelineError::NoTextFound.status(), 400);
        assert_eq!(PipelineError::MissingUrl.status(), 400);
    }

    #[test]
    fn server_errors_map_to_500() {
        assert_eq!(PipelineError::Download("x".into()).status(), 500);
        assert_eq!(PipelineError::Parse("x".into()).status(), 500);
        assert_eq!(PipelineError::Ocr("x".into()).status(), 500);
        assert_eq!(PipelineError::Credentials("x".into()).status(), 500);
        assert_eq!(PipelineError::Upload("x".into()).status(), 500);
    }

    #[test]
    fn client_messages_are_stable() {
        // Clients match on these exact strings.
        assert_eq!(PipelineError::MissingUrl.to_string(), "No PDF URL provided");
        assert_eq!(
            PipelineError::NoTextFound.to_string(),
            "No text found in the PDF"
        );
    }

    #[test]
    fn payload_serializes_error_field() {
        let payload = PipelineError::MissingUrl.to_payload();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["error"], "No PDF URL provided");
        assert_eq!(json["kind"], "missing_url");
    }
}
