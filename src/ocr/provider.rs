//! OCR providers
//!
//! The provider receives a rendered page image and returns recognized
//! text, either as one string or as word spans with pixel-space
//! bounding boxes. The default implementation shells out to a locally
//! installed `tesseract` binary.

use async_trait::async_trait;

use crate::error::{PipelineError, Result};
use crate::types::{BBox, TextSpan};

/// Recognizes text in a rendered page image
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Full-page text, as Tesseract emits it (may be empty)
    async fn recognize_text(&self, image_png: &[u8]) -> Result<String>;

    /// Word-level spans with pixel bounding boxes; empty words are
    /// discarded, never synthesized
    async fn recognize_words(&self, image_png: &[u8]) -> Result<Vec<TextSpan>>;
}

/// Subprocess Tesseract provider
pub struct TesseractOcr {
    language: String,
}

impl TesseractOcr {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    async fn run_tesseract(&self, image_png: &[u8], tsv: bool) -> Result<String> {
        use std::io::Write;

        // Tesseract reads from a file path; hand the image over via tempfile
        let mut input = tempfile::Builder::new()
            .prefix("ocr_input_")
            .suffix(".png")
            .tempfile()
            .map_err(|e| PipelineError::Ocr(format!("Failed to create temp file: {}", e)))?;
        input
            .write_all(image_png)
            .map_err(|e| PipelineError::Ocr(format!("Failed to write temp file: {}", e)))?;

        let mut command = tokio::process::Command::new("tesseract");
        command
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg("3");
        if tsv {
            command.arg("tsv");
        }

        let output = command
            .output()
            .await
            .map_err(|e| PipelineError::Ocr(format!("Failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::Ocr(format!("Tesseract failed: {}", stderr)));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| PipelineError::Ocr(format!("Tesseract output not UTF-8: {}", e)))
    }
}

#[async_trait]
impl OcrProvider for TesseractOcr {
    async fn recognize_text(&self, image_png: &[u8]) -> Result<String> {
        self.run_tesseract(image_png, false).await
    }

    async fn recognize_words(&self, image_png: &[u8]) -> Result<Vec<TextSpan>> {
        let tsv = self.run_tesseract(image_png, true).await?;
        Ok(parse_tsv_words(&tsv))
    }
}

/// Parse Tesseract TSV output into word spans.
///
/// Columns: level page block par line word left top width height conf
/// text. Word rows carry level 5; rows with blank text are dropped.
fn parse_tsv_words(tsv: &str) -> Vec<TextSpan> {
    tsv.lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 12 || fields[0] != "5" {
                return None;
            }

            let text = fields[11].trim();
            if text.is_empty() {
                return None;
            }

            let left: f32 = fields[6].parse().ok()?;
            let top: f32 = fields[7].parse().ok()?;
            let width: f32 = fields[8].parse().ok()?;
            let height: f32 = fields[9].parse().ok()?;

            Some(TextSpan {
                text: text.to_string(),
                bbox: BBox::new(left, top, left + width, top + height),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TSV: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
        1\t1\t0\t0\t0\t0\t0\t0\t600\t800\t-1\t\n\
        5\t1\t1\t1\t1\t1\t72\t90\t120\t24\t96.2\tHello\n\
        5\t1\t1\t1\t1\t2\t200\t90\t110\t24\t95.0\tworld\n\
        5\t1\t1\t1\t2\t1\t72\t130\t40\t24\t12.0\t \n";

    #[test]
    fn tsv_parsing_keeps_word_rows_only() {
        let words = parse_tsv_words(SAMPLE_TSV);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "Hello");
        assert_eq!(words[0].bbox, BBox::new(72.0, 90.0, 192.0, 114.0));
        assert_eq!(words[1].text, "world");
    }

    #[test]
    fn tsv_parsing_survives_short_lines() {
        assert!(parse_tsv_words("header\n5\t1\t1\n").is_empty());
        assert!(parse_tsv_words("").is_empty());
    }
}
