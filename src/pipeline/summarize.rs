//! Summarisation: extracted text → Titan text model on Bedrock.
//!
//! The request uses fixed generation parameters (temperature 0, top-p 1) so
//! the same page text always yields the same summary. Results are logged;
//! nothing downstream consumes them.
//!
//! ## Wire format
//!
//! ```text
//! → {"inputText": "...", "textGenerationConfig": {"maxTokenCount": 4096, "stopSequences": [], "temperature": 0, "topP": 1}}
//! ← {"inputTextTokenCount": 12, "results": [{"tokenCount": 40, "outputText": "...", "completionReason": "FINISH"}]}
//! ```

use crate::config::{GenerationConfig, PipelineConfig};
use crate::error::PipelineError;
use crate::prompts::summary_prompt;
use crate::services::{ConverseReply, TextGenerator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// Titan text request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationRequest<'a> {
    pub input_text: &'a str,
    pub text_generation_config: &'a GenerationConfig,
}

/// Titan text response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextGenerationResponse {
    #[serde(default)]
    pub results: Vec<GenerationResult>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// One generated candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub token_count: u32,
    pub output_text: String,
    #[serde(default)]
    pub completion_reason: Option<String>,
}

/// Sends text to the model and logs what comes back.
#[derive(Clone)]
pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
    model_id: String,
    generation: GenerationConfig,
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("model_id", &self.model_id)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl Summarizer {
    pub fn new(config: &PipelineConfig, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            model_id: config.model_id.clone(),
            generation: config.generation.clone(),
        }
    }

    /// Use a different model id than the configured one.
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Summarise `text` with the fixed summary prompt.
    pub async fn summarize(&self, text: &str) -> Result<Vec<GenerationResult>, PipelineError> {
        self.generate(&summary_prompt(text)).await
    }

    /// Summarise `text`, turning any failure into `"Error summarizing text: …"`.
    pub async fn summarize_text(&self, text: &str) -> Result<Vec<GenerationResult>, String> {
        self.summarize(text).await.map_err(|e| {
            let msg = format!("Error summarizing text: {}", e);
            error!("{}", msg);
            msg
        })
    }

    /// Send `prompt` as-is and log each result.
    ///
    /// # Errors
    /// [`PipelineError::Generation`] when the response carries a non-null
    /// `error`; nothing is logged as a result in that case.
    pub async fn generate(&self, prompt: &str) -> Result<Vec<GenerationResult>, PipelineError> {
        let request = TextGenerationRequest {
            input_text: prompt,
            text_generation_config: &self.generation,
        };
        let body = serde_json::to_vec(&request).map_err(PipelineError::Serialize)?;

        let raw = self.generator.invoke_model(&self.model_id, body).await?;
        let response: TextGenerationResponse =
            serde_json::from_slice(&raw).map_err(PipelineError::MalformedResponse)?;

        if let Some(err) = response.error.filter(|v| !v.is_null()) {
            let detail = match err {
                Value::String(s) => s,
                other => other.to_string(),
            };
            return Err(PipelineError::Generation(detail));
        }

        info!("Successfully generated text with model {}", self.model_id);

        for result in &response.results {
            info!("Token count: {}", result.token_count);
            info!("Output text: {}", result.output_text);
            info!(
                "Completion reason: {}",
                result.completion_reason.as_deref().unwrap_or("none")
            );
        }

        Ok(response.results)
    }

    /// Send one chat message with the given role (`user` or `assistant`).
    pub async fn converse(&self, role: &str, text: &str) -> Result<ConverseReply, PipelineError> {
        let reply = self.generator.converse(&self.model_id, role, text).await?;
        info!(
            "Converse {}: {} input tokens, {} output tokens, stop reason {}",
            self.model_id, reply.input_tokens, reply.output_tokens, reply.stop_reason
        );
        info!("Reply: {}", reply.text);
        Ok(reply)
    }
}
