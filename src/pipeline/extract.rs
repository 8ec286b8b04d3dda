//! Text extraction: one stored page image → plain text via Textract.

use crate::error::PipelineError;
use crate::output::{ExtractedText, ImageRef};
use crate::services::{TextBlock, TextDetector};
use std::sync::Arc;
use tracing::{error, info};

/// Runs document text detection against stored images.
#[derive(Clone)]
pub struct TextExtractor {
    detector: Arc<dyn TextDetector>,
}

impl std::fmt::Debug for TextExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextExtractor").finish_non_exhaustive()
    }
}

impl TextExtractor {
    pub fn new(detector: Arc<dyn TextDetector>) -> Self {
        Self { detector }
    }

    /// Detect text and join every LINE block, each followed by `\n`.
    pub async fn extract(&self, image: &ImageRef) -> Result<String, PipelineError> {
        let blocks = self
            .detector
            .detect_document_text(&image.bucket, &image.key)
            .await?;
        Ok(join_lines(&blocks))
    }

    /// Like [`extract`](Self::extract), but a failure comes back as
    /// `ExtractedText::Error` instead of an `Err`.
    pub async fn extract_text(&self, image: &ImageRef) -> ExtractedText {
        match self.extract(image).await {
            Ok(text) => {
                info!("Extracted Text: {}", text);
                ExtractedText::Text { text }
            }
            Err(e) => {
                error!("Error extracting text from image: {}", e);
                ExtractedText::Error {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Concatenate LINE blocks in response order; other block types are skipped.
pub fn join_lines(blocks: &[TextBlock]) -> String {
    let mut text = String::new();
    for block in blocks.iter().filter(|b| b.is_line()) {
        text.push_str(block.text.as_deref().unwrap_or_default());
        text.push('\n');
    }
    text
}
