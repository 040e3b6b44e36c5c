use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::sync::Arc;

use super::{MediaStorage, MediaUpload};
use crate::config::MediaConfig;
use crate::error::{AppError, Result};

/// S3-backed media storage; URLs are built from the configured public base.
#[derive(Clone)]
pub struct S3MediaStorage {
    client: Arc<Client>,
    config: MediaConfig,
}

impl S3MediaStorage {
    pub fn new(client: Arc<Client>, config: MediaConfig) -> Self {
        Self { client, config }
    }

    /// Build a client from the ambient AWS credential chain.
    pub async fn from_config(config: MediaConfig) -> Self {
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;
        let client = Client::new(&aws_config);
        Self::new(Arc::new(client), config)
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.config.public_base_url(), key)
    }
}

#[async_trait]
impl MediaStorage for S3MediaStorage {
    async fn store(&self, upload: MediaUpload) -> Result<String> {
        upload.validate()?;
        if upload.bytes.len() > self.config.max_upload_bytes {
            return Err(AppError::BadRequest(format!(
                "Upload exceeds {} bytes",
                self.config.max_upload_bytes
            )));
        }

        let key = upload.object_key();
        let size = upload.bytes.len();

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .content_type(upload.content_type.essence_str())
            .body(ByteStream::from(upload.bytes))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = ?e, "S3 upload failed");
                AppError::Storage(e.to_string())
            })?;

        tracing::info!(key = %key, size, "media stored");
        Ok(self.public_url(&key))
    }
}
