//! Lambda: final state machine task; logs what it receives.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use pdf2summary::logging::{self, LogFormat};
use pdf2summary::pipeline::steps::process_text;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init("info", LogFormat::Json);

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| async move {
        Ok::<_, Error>(process_text(&event.payload))
    }))
    .await
}
