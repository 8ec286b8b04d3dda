//! Lambda: one page image → Textract text → Titan summary.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use pdf2summary::aws::{load_sdk_config, BedrockGenerator, TextractDetector};
use pdf2summary::logging::{self, LogFormat};
use pdf2summary::pipeline::extract::TextExtractor;
use pdf2summary::pipeline::steps::ImageTextStep;
use pdf2summary::pipeline::summarize::Summarizer;
use pdf2summary::PipelineConfig;
use serde_json::Value;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init("info", LogFormat::Json);

    let config = PipelineConfig::from_env()?;
    let sdk = load_sdk_config(&config).await;

    let extractor = TextExtractor::new(Arc::new(TextractDetector::new(
        &sdk,
        config.textract_region.as_deref(),
    )));
    let summarizer = Summarizer::new(&config, Arc::new(BedrockGenerator::new(&sdk)));
    let step = ImageTextStep::new(extractor, summarizer);
    let step = &step;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        let result = step.handle(event.payload).await?;
        Ok::<_, Error>(result)
    }))
    .await
}
