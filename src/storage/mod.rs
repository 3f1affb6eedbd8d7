//! Object storage for archived PDFs
//!
//! S3-compatible backends (MinIO, Cloudflare R2, Backblaze B2, AWS).
//! The archive namespace is flat and timestamp-keyed; there is no
//! index or manifest.

mod s3;

pub use s3::S3Store;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// Storage backend the uploader talks to
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create the bucket if it does not exist. A concurrent creation
    /// race must not fail: "already exists" counts as success.
    async fn ensure_bucket(&self) -> Result<()>;

    /// Persist an object; single attempt, fatal on error
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()>;

    /// Publicly addressable URL for a stored key
    fn object_url(&self, key: &str) -> String;
}

/// Derive the archive key for one upload.
///
/// `uploads/{yyyyMMddHHmmss}_{disambiguator}[_page_{n}].pdf`. The
/// short random disambiguator keeps concurrent requests within the
/// same second from overwriting each other.
pub fn storage_key(now: DateTime<Utc>, page: Option<u32>) -> String {
    let timestamp = now.format("%Y%m%d%H%M%S");
    let disambiguator = &uuid::Uuid::new_v4().simple().to_string()[..6];

    match page {
        Some(n) => format!("uploads/{}_{}_page_{}.pdf", timestamp, disambiguator, n),
        None => format!("uploads/{}_{}.pdf", timestamp, disambiguator),
    }
}
