//! S3-compatible store implementation
//!
//! Built once from configuration with static credentials and
//! path-style addressing, then shared across requests.

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;

use crate::config::StorageConfig;
use crate::error::{PipelineError, Result};

use super::ObjectStore;

/// S3 client plus the bits of config needed for URL construction
#[derive(Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url_base: String,
}

impl S3Store {
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "static",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            public_url_base: config.public_url_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn ensure_bucket(&self) -> Result<()> {
        let head = self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await;

        if head.is_ok() {
            return Ok(());
        }

        // Missing, or a stale negative answer: attempt creation and
        // treat a lost creation race as success.
        match self
            .client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
        {
            Ok(_) => {
                tracing::info!(bucket = %self.bucket, "created storage bucket");
                Ok(())
            }
            Err(err) => {
                let already_there = matches!(
                    err.code(),
                    Some("BucketAlreadyOwnedByYou") | Some("BucketAlreadyExists")
                );
                if already_there {
                    Ok(())
                } else {
                    Err(classify(err))
                }
            }
        }
    }

    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(classify)?;

        tracing::debug!(bucket = %self.bucket, key, "stored object");
        Ok(())
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_url_base, self.bucket, key)
    }
}

/// Split storage faults into credential failures and everything else
fn classify<E>(err: SdkError<E>) -> PipelineError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let detail = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string());

    match err.code() {
        Some("InvalidAccessKeyId") | Some("SignatureDoesNotMatch") | Some("AccessDenied") => {
            PipelineError::Credentials(detail)
        }
        _ => PipelineError::Upload(detail),
    }
}
