//! Upload trigger: dispatch on file type, rasterise, start the state machine.

use crate::config::{PipelineConfig, WorkflowInput};
use crate::error::PipelineError;
use crate::event::decode_storage_event;
use crate::output::{ExecutionResult, StorageEventRef};
use crate::pipeline::rasterize::PdfConverter;
use crate::services::WorkflowClient;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// Handles S3 upload events for the pipeline's input bucket.
#[derive(Clone)]
pub struct WorkflowTrigger {
    converter: PdfConverter,
    workflow: Arc<dyn WorkflowClient>,
    state_machine_arn: String,
    input_mode: WorkflowInput,
}

impl std::fmt::Debug for WorkflowTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowTrigger")
            .field("converter", &self.converter)
            .field("state_machine_arn", &self.state_machine_arn)
            .field("input_mode", &self.input_mode)
            .finish_non_exhaustive()
    }
}

impl WorkflowTrigger {
    /// # Errors
    /// Fails if the config has no state machine ARN.
    pub fn new(
        config: &PipelineConfig,
        converter: PdfConverter,
        workflow: Arc<dyn WorkflowClient>,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            converter,
            workflow,
            state_machine_arn: config.require_state_machine_arn()?.to_string(),
            input_mode: config.workflow_input,
        })
    }

    /// Handle one storage event.
    ///
    /// Returns `{400, "Wrong file type"}` for non-PDF keys without touching any
    /// service, `{200, "OK"}` once the run has started, and
    /// `{500, "Error starting step function execution"}` if starting it fails.
    ///
    /// # Errors
    /// Event-shape and rasterisation failures are returned so the invocation
    /// fails as a whole.
    pub async fn handle(&self, event: &Value) -> Result<ExecutionResult, PipelineError> {
        let object = decode_storage_event(event)?;
        info!("This is the key: {}", object.key);

        if !object.key.ends_with(".pdf") {
            error!("This is not a pdf file: {}", object.key);
            return Ok(ExecutionResult::wrong_file_type());
        }
        info!("This is a pdf file");

        let input = self.workflow_input(&object).await?;
        info!("This is the input to the step function execution: {}", input);

        match self
            .workflow
            .start_execution(&self.state_machine_arn, &input)
            .await
        {
            Ok(execution_arn) => {
                info!("Started execution {}", execution_arn);
                Ok(ExecutionResult::ok())
            }
            Err(e) => {
                error!("Error starting step function execution: {}", e);
                Ok(ExecutionResult::start_failed())
            }
        }
    }

    async fn workflow_input(&self, object: &StorageEventRef) -> Result<String, PipelineError> {
        match self.input_mode {
            WorkflowInput::Manifest => {
                let manifest = self.converter.convert(object).await?;
                serde_json::to_string(&manifest).map_err(PipelineError::Serialize)
            }
            WorkflowInput::ObjectRef => {
                serde_json::to_string(object).map_err(PipelineError::Serialize)
            }
        }
    }
}
