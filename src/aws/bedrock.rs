use super::describe;
use crate::error::ServiceError;
use crate::services::{ConverseReply, TextGenerator};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, ConverseOutput, Message};
use aws_sdk_bedrockruntime::Client;

const JSON: &str = "application/json";

/// [`TextGenerator`] backed by the Bedrock runtime.
#[derive(Debug, Clone)]
pub struct BedrockGenerator {
    client: Client,
}

impl BedrockGenerator {
    pub fn new(sdk: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk),
        }
    }
}

#[async_trait]
impl TextGenerator for BedrockGenerator {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, ServiceError> {
        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type(JSON)
            .accept(JSON)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| ServiceError::new("bedrock", "InvokeModel", describe(&e)))?;
        Ok(output.body.into_inner())
    }

    async fn converse(&self, model_id: &str, role: &str, text: &str) -> Result<ConverseReply, ServiceError> {
        let message = Message::builder()
            .role(ConversationRole::from(role))
            .content(ContentBlock::Text(text.to_string()))
            .build()
            .map_err(|e| ServiceError::new("bedrock", "Converse", describe(&e)))?;

        let output = self
            .client
            .converse()
            .model_id(model_id)
            .messages(message)
            .send()
            .await
            .map_err(|e| ServiceError::new("bedrock", "Converse", describe(&e)))?;

        let text = match output.output() {
            Some(ConverseOutput::Message(m)) => m
                .content()
                .iter()
                .filter_map(|c| c.as_text().ok())
                .cloned()
                .collect::<Vec<_>>()
                .join("\n"),
            _ => String::new(),
        };
        let (input_tokens, output_tokens) = output
            .usage()
            .map(|u| (u.input_tokens(), u.output_tokens()))
            .unwrap_or_default();

        Ok(ConverseReply {
            text,
            stop_reason: output.stop_reason().as_str().to_string(),
            input_tokens,
            output_tokens,
        })
    }
}
