//! Process configuration
//!
//! Loaded once from the environment (with `.env` support) and injected
//! into the pipeline. All values have deployment-friendly defaults
//! matching a local MinIO setup.

use crate::types::FidelityMode;

/// Object storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// S3-compatible endpoint (MinIO, R2, B2, AWS)
    pub endpoint: String,
    /// Bucket the archived PDFs land in
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    /// Base for public object URLs, `{public_url_base}/{bucket}/{key}`
    pub public_url_base: String,
}

/// OCR fallback configuration
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract language code
    pub language: String,
    /// Rasterization scale factor (1.0 = 72 dpi)
    pub render_scale: f32,
    /// Cap on concurrent per-page OCR jobs within one request
    pub max_concurrency: usize,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            render_scale: 2.0,
            max_concurrency: 4,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub ocr: OcrConfig,
    /// Output fidelity for both extraction paths
    pub fidelity: FidelityMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                endpoint: "http://localhost:9000".to_string(),
                bucket: "pdfs".to_string(),
                access_key: "minioadmin".to_string(),
                secret_key: "minioadmin".to_string(),
                region: "us-east-1".to_string(),
                public_url_base: "http://localhost:9000".to_string(),
            },
            ocr: OcrConfig::default(),
            fidelity: FidelityMode::Plain,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to
    /// defaults for anything unset. Reads `.env` if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let endpoint = env_or("S3_ENDPOINT", &defaults.storage.endpoint);
        let storage = StorageConfig {
            public_url_base: std::env::var("S3_PUBLIC_URL_BASE")
                .unwrap_or_else(|_| endpoint.clone()),
            endpoint,
            bucket: env_or("S3_BUCKET", &defaults.storage.bucket),
            access_key: env_or("S3_ACCESS_KEY", &defaults.storage.access_key),
            secret_key: env_or("S3_SECRET_KEY", &defaults.storage.secret_key),
            region: env_or("S3_REGION", &defaults.storage.region),
        };

        let ocr = OcrConfig {
            language: env_or("OCR_LANGUAGE", &defaults.ocr.language),
            render_scale: env_parsed("OCR_RENDER_SCALE", defaults.ocr.render_scale),
            max_concurrency: env_parsed("OCR_MAX_CONCURRENCY", defaults.ocr.max_concurrency)
                .max(1),
        };

        let fidelity = match std::env::var("EXTRACTION_FIDELITY").as_deref() {
            Ok("bboxes") | Ok("bounding_boxes") => FidelityMode::BoundingBoxes,
            _ => FidelityMode::Plain,
        };

        Config {
            storage,
            ocr,
            fidelity,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_minio() {
        let config = Config::default();
        assert_eq!(config.storage.endpoint, "http://localhost:9000");
        assert_eq!(config.storage.bucket, "pdfs");
        assert_eq!(config.ocr.max_concurrency, 4);
        assert_eq!(config.fidelity, FidelityMode::Plain);
    }
}
