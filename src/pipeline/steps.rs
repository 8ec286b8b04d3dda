//! Step-function task handlers that run after the upload trigger.

use crate::error::PipelineError;
use crate::output::{ExecutionResult, ImageRef};
use crate::pipeline::extract::TextExtractor;
use crate::pipeline::summarize::Summarizer;
use serde_json::Value;
use tracing::{error, info};

/// Extract text from one page image, then summarise it.
#[derive(Debug, Clone)]
pub struct ImageTextStep {
    extractor: TextExtractor,
    summarizer: Summarizer,
}

impl ImageTextStep {
    pub fn new(extractor: TextExtractor, summarizer: Summarizer) -> Self {
        Self {
            extractor,
            summarizer,
        }
    }

    /// Handle one `{"_s3_bucket", "_s3_key"}` task input.
    ///
    /// A failed extraction skips the summary and yields a 500 result; a failed
    /// summary is only logged.
    ///
    /// # Errors
    /// Fails only if the input does not name a bucket and key.
    pub async fn handle(&self, event: Value) -> Result<ExecutionResult, PipelineError> {
        info!("{}", event);
        let image: ImageRef = serde_json::from_value(event).map_err(PipelineError::InvalidEvent)?;

        let extracted = self.extractor.extract_text(&image).await;
        let Some(text) = extracted.text() else {
            return Ok(ExecutionResult::extraction_failed());
        };

        if let Err(msg) = self.summarizer.summarize_text(text).await {
            error!("Summary for s3://{}/{} failed: {}", image.bucket, image.key, msg);
        }
        Ok(ExecutionResult::success())
    }
}

/// Log the task input and report success.
pub fn process_text(event: &Value) -> ExecutionResult {
    info!("{}", event);
    ExecutionResult::success()
}
