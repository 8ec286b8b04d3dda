//! # pdf2summary
//!
//! A serverless document pipeline: PDFs uploaded to S3 are rasterised into
//! page images, each image is read by Amazon Textract, and the text is
//! summarised by a Titan model on Amazon Bedrock. AWS Step Functions chains
//! the stages; every stage is its own Lambda function.
//!
//! ## Pipeline Overview
//!
//! ```text
//! s3://bucket/upload/report.pdf
//!  │
//!  ├─ 1. trigger-step-function  non-PDF → 400; else rasterise + start run
//!  │      └─ s3://bucket/202403151042/report-page-{1..N}.jpg
//!  ├─ 2. trigger-textract       per page: LINE text → Titan summary (logged)
//!  └─ 3. process-text           final task, logs its input
//! ```
//!
//! ## Using the stages directly
//!
//! Every stage takes its collaborators as trait objects, so it can be driven
//! against the real AWS clients or against fakes:
//!
//! ```rust,no_run
//! use pdf2summary::aws::{load_sdk_config, S3ObjectStore, StepFunctionsClient};
//! use pdf2summary::pipeline::{rasterize::PdfConverter, render::PdfiumRasterizer, trigger::WorkflowTrigger};
//! use pdf2summary::{PipelineConfig, SystemClock};
//! use std::sync::Arc;
//!
//! # async fn run(event: serde_json::Value) -> Result<(), pdf2summary::PipelineError> {
//! let config = PipelineConfig::from_env()?;
//! let sdk = load_sdk_config(&config).await;
//! let converter = PdfConverter::new(
//!     &config,
//!     Arc::new(S3ObjectStore::new(&sdk)),
//!     Arc::new(PdfiumRasterizer::new(&config)),
//!     Arc::new(SystemClock),
//! );
//! let trigger = WorkflowTrigger::new(&config, converter, Arc::new(StepFunctionsClient::new(&sdk)))?;
//! let result = trigger.handle(&event).await?;
//! println!("{} {}", result.status_code, result.message);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `lambda` | on      | Lambda function binaries (lambda_runtime + tracing-subscriber) |
//! | `cli`    | on      | The `ask-model` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod aws;
pub mod config;
pub mod error;
pub mod event;
#[cfg(any(feature = "cli", feature = "lambda"))]
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod services;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{GenerationConfig, PipelineConfig, PipelineConfigBuilder, WorkflowInput};
pub use error::{PipelineError, ServiceError};
pub use event::decode_storage_event;
pub use output::{ConversionManifest, ExecutionResult, ExtractedText, ImageRef, StorageEventRef};
pub use services::{
    Clock, ConverseReply, ObjectStore, PageRasterizer, SystemClock, TextBlock, TextDetector,
    TextGenerator, WorkflowClient,
};
