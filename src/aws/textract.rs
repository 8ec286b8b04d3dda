use super::describe;
use crate::error::ServiceError;
use crate::services::{TextBlock, TextDetector};
use async_trait::async_trait;
use aws_config::{Region, SdkConfig};
use aws_sdk_textract::types::{Document, S3Object};
use aws_sdk_textract::Client;

/// [`TextDetector`] backed by Textract's synchronous `DetectDocumentText`.
#[derive(Debug, Clone)]
pub struct TextractDetector {
    client: Client,
}

impl TextractDetector {
    /// Build a client, optionally pinned to a region other than the SDK default.
    pub fn new(sdk: &SdkConfig, region: Option<&str>) -> Self {
        let mut conf = aws_sdk_textract::config::Builder::from(sdk);
        if let Some(region) = region {
            conf = conf.region(Region::new(region.to_string()));
        }
        Self {
            client: Client::from_conf(conf.build()),
        }
    }
}

#[async_trait]
impl TextDetector for TextractDetector {
    async fn detect_document_text(&self, bucket: &str, key: &str) -> Result<Vec<TextBlock>, ServiceError> {
        let document = Document::builder()
            .s3_object(S3Object::builder().bucket(bucket).name(key).build())
            .build();

        let output = self
            .client
            .detect_document_text()
            .document(document)
            .send()
            .await
            .map_err(|e| ServiceError::new("textract", "DetectDocumentText", describe(&e)))?;

        Ok(output
            .blocks()
            .iter()
            .map(|b| TextBlock {
                block_type: b
                    .block_type()
                    .map(|t| t.as_str().to_string())
                    .unwrap_or_default(),
                text: b.text().map(str::to_string),
            })
            .collect())
    }
}
