//! Trait seams for every external collaborator.
//!
//! The pipeline components only see these traits. [`crate::aws`] provides the
//! AWS SDK implementations; tests provide in-memory fakes.

use crate::error::{PipelineError, ServiceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Object storage (S3).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download `bucket/key` into `dest`, returning the number of bytes written.
    async fn download_to(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, ServiceError>;

    /// Upload `body` as `bucket/key`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ServiceError>;
}

/// Workflow orchestration (Step Functions).
#[async_trait]
pub trait WorkflowClient: Send + Sync {
    /// Start a run of `state_machine_arn` with a JSON `input`; returns the run id.
    async fn start_execution(
        &self,
        state_machine_arn: &str,
        input: &str,
    ) -> Result<String, ServiceError>;
}

/// One segment of a text-detection response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    /// `PAGE`, `LINE` or `WORD`.
    pub block_type: String,
    pub text: Option<String>,
}

impl TextBlock {
    pub fn is_line(&self) -> bool {
        self.block_type == "LINE"
    }
}

/// Document text detection (Textract).
#[async_trait]
pub trait TextDetector: Send + Sync {
    /// Detect text in a stored image; blocks are returned in document order.
    async fn detect_document_text(&self, bucket: &str, key: &str) -> Result<Vec<TextBlock>, ServiceError>;
}

/// Reply to a single-turn Converse call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConverseReply {
    pub text: String,
    pub stop_reason: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
}

/// Generative text (Bedrock runtime).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Invoke `model_id` with a JSON request body; returns the raw JSON response body.
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, ServiceError>;

    /// Send one message with the given role through the Converse API.
    async fn converse(&self, model_id: &str, role: &str, text: &str) -> Result<ConverseReply, ServiceError>;
}

/// PDF rasterisation.
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    /// Render every page of the PDF at `pdf_path` to JPEG bytes, in page order.
    async fn rasterize(&self, pdf_path: &Path) -> Result<Vec<Vec<u8>>, PipelineError>;
}

/// Wall clock, injectable so run directories are predictable in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_blocks() {
        let line = TextBlock {
            block_type: "LINE".into(),
            text: Some("x".into()),
        };
        assert!(line.is_line());
        let word = TextBlock {
            block_type: "WORD".into(),
            text: Some("x".into()),
        };
        assert!(!word.is_line());
    }
}
