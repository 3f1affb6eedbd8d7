//! Page rasterization for OCR
//!
//! Renders a single page to a PNG at a scale factor (1.0 = 72 dpi)
//! via a MuPDF pixmap. Blocking; callers run this under
//! `spawn_blocking`.

use std::io::Cursor;

use image::DynamicImage;
use mupdf::{Colorspace, Matrix};

use crate::error::{PipelineError, Result};

use super::PdfBuffer;

/// Render one page (1-based) to PNG bytes. Returns the encoded image
/// and its pixel dimensions.
pub fn render_page_png(buffer: &PdfBuffer, page_number: u32, scale: f32) -> Result<(Vec<u8>, u32, u32)> {
    // Parse faults discovered during rasterization belong to the OCR stage.
    let doc = buffer
        .open()
        .map_err(|e| PipelineError::Ocr(e.to_string()))?;
    let page = doc
        .load_page((page_number - 1) as i32)
        .map_err(|e| PipelineError::Ocr(format!("Failed to load page {}: {}", page_number, e)))?;

    let matrix = Matrix::new_scale(scale, scale);
    let colorspace = Colorspace::device_rgb();
    let pixmap = page
        .to_pixmap(&matrix, &colorspace, true, true)
        .map_err(|e| PipelineError::Ocr(format!("Rasterization failed: {}", e)))?;

    encode_pixmap(&pixmap)
}

/// Convert a pixmap's samples to an RGBA buffer and encode as PNG
fn encode_pixmap(pixmap: &mupdf::Pixmap) -> Result<(Vec<u8>, u32, u32)> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    let mut rgba_buffer = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(0);
            let b = samples.get(offset + 2).copied().unwrap_or(0);
            let a = if n >= 4 {
                samples.get(offset + 3).copied().unwrap_or(255)
            } else {
                255
            };
            rgba_buffer.extend_from_slice(&[r, g, b, a]);
        }
    }

    let img = image::RgbaImage::from_raw(width, height, rgba_buffer)
        .ok_or_else(|| PipelineError::Ocr("Failed to create image buffer".to_string()))?;

    let mut output = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)
        .map_err(|e| PipelineError::Ocr(format!("PNG encoding failed: {}", e)))?;

    Ok((output, width, height))
}
