//! In-memory fakes for the service traits.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pdf2summary::{
    Clock, ConverseReply, ObjectStore, PageRasterizer, PipelineConfig, PipelineError, ServiceError,
    TextBlock, TextDetector, TextGenerator, WorkflowClient,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ARN: &str = "arn:aws:states:us-east-1:123456789012:stateMachine:my-state-machine";

pub fn upload_event(key: &str) -> Value {
    json!({
        "Records": [
            {
                "s3": {
                    "bucket": {"name": "my-bucket"},
                    "object": {"key": key}
                }
            }
        ]
    })
}

pub fn config_in(scratch: &Path) -> PipelineConfig {
    PipelineConfig::builder()
        .state_machine_arn(ARN)
        .scratch_dir(scratch)
        .build()
        .expect("valid config")
}

pub fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).map(|mut d| d.next().is_none()).unwrap_or(false)
}

// ── Clock ────────────────────────────────────────────────────────────────

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// 2023-03-08 12:34 UTC → `202303081234`.
    pub fn march_8th() -> Self {
        Self(Utc.with_ymd_and_hms(2023, 3, 8, 12, 34, 56).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ── Object store ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryStore {
    pub objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    pub put_keys: Mutex<Vec<String>>,
    pub downloads: AtomicUsize,
    /// Fail the Nth put (1-based).
    pub fail_put_at: Option<usize>,
}

impl MemoryStore {
    pub fn with_object(bucket: &str, key: &str, body: &[u8]) -> Self {
        let store = Self::default();
        store
            .objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body.to_vec());
        store
    }

    pub fn calls(&self) -> usize {
        self.downloads.load(Ordering::SeqCst) + self.put_keys.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn download_to(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, ServiceError> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        let body = self
            .objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| ServiceError::new("s3", "GetObject", "NoSuchKey"))?;
        std::fs::write(dest, &body).map_err(|e| ServiceError::new("s3", "GetObject", e.to_string()))?;
        Ok(body.len() as u64)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), ServiceError> {
        let mut keys = self.put_keys.lock().unwrap();
        keys.push(key.to_string());
        if self.fail_put_at == Some(keys.len()) {
            return Err(ServiceError::new("s3", "PutObject", "SlowDown"));
        }
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body);
        Ok(())
    }
}

// ── Rasterizer ───────────────────────────────────────────────────────────

/// Produces `pages` fake JPEGs; remembers the scratch paths it was given.
#[derive(Default)]
pub struct FakeRasterizer {
    pub pages: usize,
    pub fail: bool,
    pub seen: Mutex<Vec<(PathBuf, Vec<u8>)>>,
}

impl FakeRasterizer {
    pub fn with_pages(pages: usize) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl PageRasterizer for FakeRasterizer {
    async fn rasterize(&self, pdf_path: &Path) -> Result<Vec<Vec<u8>>, PipelineError> {
        let contents = std::fs::read(pdf_path)?;
        self.seen.lock().unwrap().push((pdf_path.to_path_buf(), contents));
        if self.fail {
            return Err(PipelineError::RasterisationFailed {
                page: 1,
                detail: "fake failure".into(),
            });
        }
        Ok((1..=self.pages).map(|n| vec![0xFF, 0xD8, n as u8]).collect())
    }
}

// ── Workflow ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeWorkflow {
    pub fail: bool,
    pub starts: Mutex<Vec<(String, String)>>,
}

impl FakeWorkflow {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.starts.lock().unwrap().len()
    }
}

#[async_trait]
impl WorkflowClient for FakeWorkflow {
    async fn start_execution(&self, state_machine_arn: &str, input: &str) -> Result<String, ServiceError> {
        self.starts
            .lock()
            .unwrap()
            .push((state_machine_arn.to_string(), input.to_string()));
        if self.fail {
            return Err(ServiceError::new("sfn", "StartExecution", "Error"));
        }
        Ok(format!("{state_machine_arn}:run-1"))
    }
}

// ── Text detection ───────────────────────────────────────────────────────

pub struct FakeDetector {
    pub result: Result<Vec<TextBlock>, ServiceError>,
    pub requests: Mutex<Vec<(String, String)>>,
}

impl FakeDetector {
    pub fn returning(blocks: Vec<TextBlock>) -> Self {
        Self {
            result: Ok(blocks),
            requests: Mutex::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(ServiceError::new("textract", "DetectDocumentText", message)),
            requests: Mutex::default(),
        }
    }
}

#[async_trait]
impl TextDetector for FakeDetector {
    async fn detect_document_text(&self, bucket: &str, key: &str) -> Result<Vec<TextBlock>, ServiceError> {
        self.requests
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));
        self.result.clone()
    }
}

pub fn block(kind: &str, text: Option<&str>) -> TextBlock {
    TextBlock {
        block_type: kind.to_string(),
        text: text.map(str::to_string),
    }
}

// ── Text generation ──────────────────────────────────────────────────────

/// Answers every InvokeModel with `response`; records request bodies.
pub struct FakeGenerator {
    pub response: Value,
    pub requests: Mutex<Vec<(String, Value)>>,
    pub conversations: Mutex<Vec<(String, String, String)>>,
}

impl FakeGenerator {
    pub fn answering(response: Value) -> Self {
        Self {
            response,
            requests: Mutex::default(),
            conversations: Mutex::default(),
        }
    }

    pub fn titan(output: &str) -> Self {
        Self::answering(json!({
            "inputTextTokenCount": 12,
            "results": [{"tokenCount": 5, "outputText": output, "completionReason": "FINISH"}]
        }))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, ServiceError> {
        let request: Value = serde_json::from_slice(&body)
            .map_err(|e| ServiceError::new("bedrock", "InvokeModel", e.to_string()))?;
        self.requests
            .lock()
            .unwrap()
            .push((model_id.to_string(), request));
        Ok(serde_json::to_vec(&self.response).unwrap())
    }

    async fn converse(&self, model_id: &str, role: &str, text: &str) -> Result<ConverseReply, ServiceError> {
        self.conversations
            .lock()
            .unwrap()
            .push((model_id.to_string(), role.to_string(), text.to_string()));
        Ok(ConverseReply {
            text: "I am a model.".into(),
            stop_reason: "end_turn".into(),
            input_tokens: 4,
            output_tokens: 4,
        })
    }
}

/// Log lines written while a [`LogCapture`] guard is alive on this thread.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub struct LogCapture {
    pub logs: LogBuffer,
    _guard: tracing::subscriber::DefaultGuard,
}

/// Route `tracing` output on the current thread into an in-memory buffer.
///
/// `#[tokio::test]` runs on a current-thread runtime, so events emitted by
/// the code under test land in the same buffer.
pub fn capture_logs() -> LogCapture {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    LogCapture {
        logs,
        _guard: tracing::subscriber::set_default(subscriber),
    }
}
