//! Payload types exchanged between stages and returned from each function.
//!
//! Field names follow the JSON documents the state machine already consumes
//! (`_s3_bucket`, `_s3_key`, `statusCode`, …), so every type here carries
//! explicit serde renames.

use serde::{Deserialize, Serialize};

/// Body string the upload trigger has always put in its manifest.
pub const MANIFEST_BODY: &str = "PDF converted and images uploaded to S3";

/// Bucket/key of the object that raised a storage event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEventRef {
    #[serde(rename = "_s3_bucket")]
    pub bucket: String,
    #[serde(rename = "_s3_key")]
    pub key: String,
    /// `bucket + "/" + key`.
    #[serde(rename = "_s3_object")]
    pub composite_id: String,
}

impl StorageEventRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let key = key.into();
        let composite_id = format!("{bucket}/{key}");
        Self {
            bucket,
            key,
            composite_id,
        }
    }
}

/// A single stored image handed to the extraction step.
///
/// Unknown fields in the step input are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(rename = "_s3_bucket")]
    pub bucket: String,
    #[serde(rename = "_s3_key")]
    pub key: String,
}

/// Objects produced by rasterising one PDF; the orchestration run input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionManifest {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded status text, kept for state machines that read it.
    pub body: String,
    #[serde(rename = "_s3_bucket")]
    pub bucket: String,
    /// Minute-timestamp directory the page images were uploaded under.
    #[serde(rename = "_s3_path")]
    pub path_prefix: String,
    /// Page image filenames in page order (relative to `path_prefix`).
    #[serde(rename = "_s3_objects")]
    pub produced_object_keys: Vec<String>,
}

impl ConversionManifest {
    pub fn new(bucket: String, path_prefix: String, produced_object_keys: Vec<String>) -> Self {
        Self {
            status_code: 200,
            body: serde_json::Value::String(MANIFEST_BODY.to_string()).to_string(),
            bucket,
            path_prefix,
            produced_object_keys,
        }
    }

    /// Full object keys (`<path_prefix>/<file>`) in page order.
    pub fn object_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.produced_object_keys
            .iter()
            .map(move |name| format!("{}/{}", self.path_prefix, name))
    }
}

/// Result of the extraction step: either the text or the error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedText {
    Text { text: String },
    Error { error: String },
}

impl ExtractedText {
    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractedText::Text { text } => Some(text),
            ExtractedText::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ExtractedText::Text { .. } => None,
            ExtractedText::Error { error } => Some(error),
        }
    }
}

/// Uniform `{statusCode, message}` response returned by every function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
}

impl ExecutionResult {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    /// Orchestration run started.
    pub fn ok() -> Self {
        Self::new(200, "OK")
    }

    /// Step finished; used by the step-function tasks.
    pub fn success() -> Self {
        Self::new(200, "Success")
    }

    pub fn wrong_file_type() -> Self {
        Self::new(400, "Wrong file type")
    }

    pub fn start_failed() -> Self {
        Self::new(500, "Error starting step function execution")
    }

    pub fn extraction_failed() -> Self {
        Self::new(500, "Error extracting text from image")
    }
}
