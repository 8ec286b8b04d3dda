//! AWS SDK implementations of the [`crate::services`] traits.
//!
//! One shared `SdkConfig` is loaded per process (Lambda cold start) and every
//! client is built from it. Textract may run in a different region from the
//! rest of the pipeline, so its client takes an optional region override.

mod bedrock;
mod s3;
mod sfn;
mod textract;

pub use bedrock::BedrockGenerator;
pub use s3::S3ObjectStore;
pub use sfn::StepFunctionsClient;
pub use textract::TextractDetector;

use crate::config::PipelineConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

/// Load the shared SDK configuration, honouring `config.region`.
pub async fn load_sdk_config(config: &PipelineConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    let sdk = loader.load().await;
    debug!("AWS SDK config loaded for region {:?}", sdk.region());
    sdk
}

/// Render an SDK error with its full source chain.
pub(crate) fn describe<E>(err: &E) -> String
where
    E: std::error::Error,
{
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(s) = source {
        msg.push_str(": ");
        msg.push_str(&s.to_string());
        source = s.source();
    }
    msg
}
