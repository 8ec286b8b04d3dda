use super::describe;
use crate::error::ServiceError;
use crate::services::ObjectStore;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::Path;

/// [`ObjectStore`] backed by S3.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(sdk: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn download_to(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, ServiceError> {
        let object = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ServiceError::new("s3", "GetObject", describe(&e)))?;

        let bytes = object
            .body
            .collect()
            .await
            .map_err(|e| ServiceError::new("s3", "GetObject", describe(&e)))?
            .into_bytes();

        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|e| ServiceError::new("s3", "GetObject", format!("write {}: {}", dest.display(), e)))?;

        Ok(bytes.len() as u64)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ServiceError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| ServiceError::new("s3", "PutObject", describe(&e)))?;
        Ok(())
    }
}
