//! Lambda: S3 upload → rasterise PDF → start the state machine.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use pdf2summary::aws::{load_sdk_config, S3ObjectStore, StepFunctionsClient};
use pdf2summary::logging::{self, LogFormat};
use pdf2summary::pipeline::rasterize::PdfConverter;
use pdf2summary::pipeline::render::PdfiumRasterizer;
use pdf2summary::pipeline::trigger::WorkflowTrigger;
use pdf2summary::{ExecutionResult, PipelineConfig, SystemClock};
use serde_json::Value;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init("info", LogFormat::Json);

    let config = PipelineConfig::from_env()?;
    let sdk = load_sdk_config(&config).await;

    let converter = PdfConverter::new(
        &config,
        Arc::new(S3ObjectStore::new(&sdk)),
        Arc::new(PdfiumRasterizer::new(&config)),
        Arc::new(SystemClock),
    );
    let trigger = WorkflowTrigger::new(&config, converter, Arc::new(StepFunctionsClient::new(&sdk)))?;
    let trigger = &trigger;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        tracing::info!("{}", event.payload);
        let result: ExecutionResult = trigger.handle(&event.payload).await?;
        Ok::<_, Error>(result)
    }))
    .await
}
