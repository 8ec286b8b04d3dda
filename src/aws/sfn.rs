use super::describe;
use crate::error::ServiceError;
use crate::services::WorkflowClient;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sfn::Client;

/// [`WorkflowClient`] backed by Step Functions.
#[derive(Debug, Clone)]
pub struct StepFunctionsClient {
    client: Client,
}

impl StepFunctionsClient {
    pub fn new(sdk: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk),
        }
    }
}

#[async_trait]
impl WorkflowClient for StepFunctionsClient {
    async fn start_execution(
        &self,
        state_machine_arn: &str,
        input: &str,
    ) -> Result<String, ServiceError> {
        let output = self
            .client
            .start_execution()
            .state_machine_arn(state_machine_arn)
            .input(input)
            .send()
            .await
            .map_err(|e| ServiceError::new("sfn", "StartExecution", describe(&e)))?;
        Ok(output.execution_arn().to_string())
    }
}
