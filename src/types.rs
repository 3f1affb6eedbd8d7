//! Pipeline data model
//!
//! Request/response payloads and the page-indexed extraction shapes
//! shared by the native and OCR extractors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Extracted content keyed by 1-based page index, page-ascending.
pub type ExtractionResult = BTreeMap<u32, PageContent>;

/// Output fidelity for both extraction paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FidelityMode {
    /// One concatenated string per page
    Plain,
    /// One TextSpan per text run, with bounding boxes
    BoundingBoxes,
}

impl Default for FidelityMode {
    fn default() -> Self {
        Self::Plain
    }
}

/// Axis-aligned bounding box, `(x0, y0, x1, y1)`.
///
/// Native spans use PDF page coordinates; OCR spans use pixel
/// coordinates of the rendered raster. The two spaces are not
/// comparable without a scaling transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest box containing both
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// A run of text with its bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub bbox: BBox,
}

/// Per-page content in the configured fidelity mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageContent {
    Text(String),
    Spans(Vec<TextSpan>),
}

impl PageContent {
    /// All text of the page, span texts joined with spaces.
    pub fn as_text(&self) -> String {
        match self {
            PageContent::Text(s) => s.clone(),
            PageContent::Spans(spans) => spans
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// True when the page carries no non-whitespace text
    pub fn is_blank(&self) -> bool {
        match self {
            PageContent::Text(s) => s.trim().is_empty(),
            PageContent::Spans(spans) => spans.iter().all(|s| s.text.trim().is_empty()),
        }
    }
}

/// Inbound request, as handed over by the external HTTP layer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractRequest {
    /// URL of the remotely hosted PDF
    #[serde(default)]
    pub pdf_url: Option<String>,
    /// Optional 1-based page selector; absent means all pages
    #[serde(default)]
    pub page: Option<u32>,
}

impl ExtractRequest {
    pub fn new(pdf_url: impl Into<String>) -> Self {
        Self {
            pdf_url: Some(pdf_url.into()),
            page: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// Success payload, constructed once per request and serialized
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub extracted_text: ExtractionResult,
    pub file_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection_ignores_whitespace() {
        assert!(PageContent::Text("  \n\t ".into()).is_blank());
        assert!(!PageContent::Text("hello".into()).is_blank());
        assert!(PageContent::Spans(vec![]).is_blank());
        assert!(!PageContent::Spans(vec![TextSpan {
            text: "hi".into(),
            bbox: BBox::new(0.0, 0.0, 1.0, 1.0),
        }])
        .is_blank());
    }

    #[test]
    fn bbox_union_covers_both() {
        let a = BBox::new(0.0, 0.0, 2.0, 2.0);
        let b = BBox::new(1.0, -1.0, 3.0, 1.0);
        assert_eq!(a.union(&b), BBox::new(0.0, -1.0, 3.0, 2.0));
    }

    #[test]
    fn result_serializes_camel_case() {
        let mut extracted = ExtractionResult::new();
        extracted.insert(1, PageContent::Text("hello".into()));
        let result = PipelineResult {
            extracted_text: extracted,
            file_url: "http://localhost:9000/pdfs/uploads/x.pdf".into(),
            total_pages: Some(1),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["extractedText"]["1"], "hello");
        assert_eq!(json["totalPages"], 1);
        assert!(json["fileUrl"].as_str().unwrap().ends_with(".pdf"));
    }

    #[test]
    fn spans_serialize_untagged() {
        let content = PageContent::Spans(vec![TextSpan {
            text: "word".into(),
            bbox: BBox::new(1.0, 2.0, 3.0, 4.0),
        }]);
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json[0]["text"], "word");
        assert_eq!(json[0]["bbox"]["x1"], 3.0);
    }

    #[test]
    fn request_deserializes_missing_fields() {
        let req: ExtractRequest = serde_json::from_str("{}").unwrap();
        assert!(req.pdf_url.is_none());
        assert!(req.page.is_none());
    }
}
