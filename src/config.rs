//! Configuration types for the pipeline functions.
//!
//! Everything the functions used to read from module globals (state machine
//! ARN, regions, model id) lives in [`PipelineConfig`] and is handed to each
//! component when it is constructed. Tests build a config in place instead of
//! mutating the process environment.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Default Bedrock model for summaries.
pub const DEFAULT_MODEL_ID: &str = "amazon.titan-text-express-v1";

/// Configuration shared by all pipeline functions.
///
/// Built via [`PipelineConfig::builder()`], [`PipelineConfig::from_env()`] or
/// [`PipelineConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2summary::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .state_machine_arn("arn:aws:states:us-east-1:123456789012:stateMachine:pdf")
///     .dpi(150)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// AWS region for all clients. If None, uses the SDK default chain.
    pub region: Option<String>,

    /// Region override for the Textract client only.
    pub textract_region: Option<String>,

    /// State machine started by the upload trigger.
    pub state_machine_arn: Option<String>,

    /// Bedrock model id used for summaries.
    pub model_id: String,

    /// Generation parameters sent with every summary request.
    pub generation: GenerationConfig,

    /// Key prefix uploads arrive under. Default: `"upload/"`.
    pub upload_prefix: String,

    /// `chrono` format for the per-run image directory. Default: `%Y%m%d%H%M`.
    pub path_format: String,

    /// Directory for the downloaded PDF. Default: the OS temp dir (`/tmp` on Lambda).
    pub scratch_dir: PathBuf,

    /// Rendering DPI. Range: 72–400. Default: 200.
    pub dpi: u32,

    /// Cap on either rendered dimension in pixels. Default: 4000.
    pub max_rendered_pixels: u32,

    /// JPEG quality for page images. Range: 1–100. Default: 75.
    pub jpeg_quality: u8,

    /// Path to libpdfium. If None, binds to the system library.
    pub pdfium_lib_path: Option<PathBuf>,

    /// What the upload trigger passes as the orchestration run input.
    pub workflow_input: WorkflowInput,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            region: None,
            textract_region: None,
            state_machine_arn: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            generation: GenerationConfig::default(),
            upload_prefix: "upload/".to_string(),
            path_format: "%Y%m%d%H%M".to_string(),
            scratch_dir: std::env::temp_dir(),
            dpi: 200,
            max_rendered_pixels: 4000,
            jpeg_quality: 75,
            pdfium_lib_path: None,
            workflow_input: WorkflowInput::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }

    /// Build a config from the function's environment variables.
    ///
    /// Unset variables keep their defaults; set-but-unparsable ones are errors.
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let mut b = Self::builder();

        if let Some(v) = get("AWS_REGION") {
            b = b.region(v);
        }
        if let Some(v) = get("TEXTRACT_REGION") {
            b = b.textract_region(v);
        }
        if let Some(v) = get("STATEMACHINE_STATE_MACHINE_ARN") {
            b = b.state_machine_arn(v);
        }
        if let Some(v) = get("MODEL_ID") {
            b = b.model_id(v);
        }
        if let Some(v) = get("UPLOAD_PREFIX") {
            b = b.upload_prefix(v);
        }
        if let Some(v) = get("SCRATCH_DIR") {
            b = b.scratch_dir(v);
        }
        if let Some(v) = get("RENDER_DPI") {
            b = b.dpi(parse_var("RENDER_DPI", &v)?);
        }
        if let Some(v) = get("JPEG_QUALITY") {
            b = b.jpeg_quality(parse_var("JPEG_QUALITY", &v)?);
        }
        if let Some(v) = get("PDFIUM_LIB_PATH") {
            b = b.pdfium_lib_path(v);
        }
        if let Some(v) = get("WORKFLOW_INPUT") {
            b = b.workflow_input(parse_var("WORKFLOW_INPUT", &v)?);
        }
        b.build()
    }

    /// The state machine ARN, or an error naming the variable to set.
    pub fn require_state_machine_arn(&self) -> Result<&str, PipelineError> {
        self.state_machine_arn.as_deref().ok_or_else(|| {
            PipelineError::InvalidConfig(
                "state machine ARN is not set (STATEMACHINE_STATE_MACHINE_ARN)".into(),
            )
        })
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, PipelineError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| PipelineError::InvalidConfig(format!("{name}={value:?}: {e}")))
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = Some(region.into());
        self
    }

    pub fn textract_region(mut self, region: impl Into<String>) -> Self {
        self.config.textract_region = Some(region.into());
        self
    }

    pub fn state_machine_arn(mut self, arn: impl Into<String>) -> Self {
        self.config.state_machine_arn = Some(arn.into());
        self
    }

    pub fn model_id(mut self, id: impl Into<String>) -> Self {
        self.config.model_id = id.into();
        self
    }

    pub fn generation(mut self, generation: GenerationConfig) -> Self {
        self.config.generation = generation;
        self
    }

    pub fn upload_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.upload_prefix = prefix.into();
        self
    }

    pub fn path_format(mut self, format: impl Into<String>) -> Self {
        self.config.path_format = format.into();
        self
    }

    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.scratch_dir = dir.into();
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = px.max(100);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality;
        self
    }

    pub fn pdfium_lib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(path.into());
        self
    }

    pub fn workflow_input(mut self, mode: WorkflowInput) -> Self {
        self.config.workflow_input = mode;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PipelineConfig, PipelineError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 400 {
            return Err(PipelineError::InvalidConfig(format!(
                "DPI must be 72–400, got {}",
                c.dpi
            )));
        }
        if c.jpeg_quality == 0 || c.jpeg_quality > 100 {
            return Err(PipelineError::InvalidConfig(format!(
                "JPEG quality must be 1–100, got {}",
                c.jpeg_quality
            )));
        }
        if c.upload_prefix.is_empty() || !c.upload_prefix.ends_with('/') {
            return Err(PipelineError::InvalidConfig(format!(
                "upload prefix must be a directory ending in '/', got {:?}",
                c.upload_prefix
            )));
        }
        if c.model_id.is_empty() {
            return Err(PipelineError::InvalidConfig("model id must not be empty".into()));
        }
        c.generation.validate()?;
        Ok(self.config)
    }
}

// ── Generation parameters ────────────────────────────────────────────────

/// `textGenerationConfig` block of a Titan text request.
///
/// The defaults make summaries deterministic: temperature 0, top-p 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_token_count: u32,
    pub stop_sequences: Vec<String>,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_token_count: 4096,
            stop_sequences: Vec::new(),
            temperature: 0.0,
            top_p: 1.0,
        }
    }
}

impl GenerationConfig {
    fn validate(&self) -> Result<(), PipelineError> {
        if self.max_token_count == 0 {
            return Err(PipelineError::InvalidConfig("maxTokenCount must be ≥ 1".into()));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(PipelineError::InvalidConfig(format!(
                "temperature must be 0–1, got {}",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(PipelineError::InvalidConfig(format!(
                "topP must be 0–1, got {}",
                self.top_p
            )));
        }
        Ok(())
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Input document for the orchestration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkflowInput {
    /// The rasterisation manifest (default).
    #[default]
    Manifest,
    /// Only the uploaded object's bucket/key; no rasterisation happens.
    ObjectRef,
}

impl FromStr for WorkflowInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manifest" => Ok(WorkflowInput::Manifest),
            "object" | "object-ref" | "objectref" => Ok(WorkflowInput::ObjectRef),
            other => Err(format!("expected 'manifest' or 'object', got '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let c = PipelineConfig::default();
        assert_eq!(c.model_id, "amazon.titan-text-express-v1");
        assert_eq!(c.upload_prefix, "upload/");
        assert_eq!(c.path_format, "%Y%m%d%H%M");
        assert_eq!(c.generation.max_token_count, 4096);
        assert_eq!(c.generation.temperature, 0.0);
        assert_eq!(c.generation.top_p, 1.0);
        assert!(c.generation.stop_sequences.is_empty());
        assert_eq!(c.workflow_input, WorkflowInput::Manifest);
    }

    #[test]
    fn generation_config_wire_names() {
        let v = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "maxTokenCount": 4096,
                "stopSequences": [],
                "temperature": 0.0,
                "topP": 1.0
            })
        );
    }

    #[test]
    fn builder_rejects_bad_dpi() {
        let err = PipelineConfig::builder().dpi(10).build().unwrap_err();
        assert!(err.to_string().contains("DPI"));
    }

    #[test]
    fn builder_rejects_prefix_without_slash() {
        assert!(PipelineConfig::builder().upload_prefix("upload").build().is_err());
    }

    #[test]
    fn builder_rejects_hot_temperature() {
        let generation = GenerationConfig {
            temperature: 1.5,
            ..Default::default()
        };
        assert!(PipelineConfig::builder().generation(generation).build().is_err());
    }

    #[test]
    fn from_lookup_reads_variables() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("STATEMACHINE_STATE_MACHINE_ARN", "arn:aws:states:us-east-1:123456789012:stateMachine:my-state-machine"),
            ("MODEL_ID", "amazon.titan-text-lite-v1"),
            ("TEXTRACT_REGION", "ap-southeast-2"),
            ("WORKFLOW_INPUT", "object"),
            ("RENDER_DPI", ""),
        ]);
        let c = PipelineConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(
            c.require_state_machine_arn().unwrap(),
            "arn:aws:states:us-east-1:123456789012:stateMachine:my-state-machine"
        );
        assert_eq!(c.model_id, "amazon.titan-text-lite-v1");
        assert_eq!(c.textract_region.as_deref(), Some("ap-southeast-2"));
        assert_eq!(c.workflow_input, WorkflowInput::ObjectRef);
        assert_eq!(c.dpi, 200);
    }

    #[test]
    fn from_lookup_rejects_unparsable_values() {
        let err = PipelineConfig::from_lookup(|k| (k == "JPEG_QUALITY").then(|| "high".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("JPEG_QUALITY"));
    }

    #[test]
    fn missing_arn_is_reported() {
        let err = PipelineConfig::default().require_state_machine_arn().unwrap_err();
        assert!(err.to_string().contains("STATEMACHINE_STATE_MACHINE_ARN"));
    }
}
