//! Error types for the pdf2summary library.
//!
//! Every stage returns `Result<T, PipelineError>`. What happens to the error
//! is decided at the function boundary, not inside the stage:
//!
//! * the upload trigger lets event, key and rasterisation errors fail the
//!   invocation, but maps a failed workflow start to a 500 result;
//! * the extraction step folds its error into an `{"error": …}` payload;
//! * the summariser folds its error into a descriptive string.
//!
//! [`ServiceError`] is the common shape for any failed call to an external
//! collaborator (object store, workflow engine, OCR, model runtime).

use std::path::PathBuf;
use thiserror::Error;

/// A failed call to an external service.
#[derive(Debug, Clone, Error)]
#[error("{service} {operation} failed: {message}")]
pub struct ServiceError {
    /// Short service name, e.g. `"s3"` or `"textract"`.
    pub service: &'static str,
    /// API operation, e.g. `"GetObject"`.
    pub operation: &'static str,
    /// Rendered error detail from the client.
    pub message: String,
}

impl ServiceError {
    pub fn new(service: &'static str, operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            service,
            operation,
            message: message.into(),
        }
    }
}

/// All errors returned by the pdf2summary library.
#[derive(Debug, Error)]
pub enum PipelineError {
    // ── Event errors ──────────────────────────────────────────────────────
    /// The inbound event is missing a required field (or it is not a string).
    #[error("Event is missing required field '{pointer}'")]
    MissingEventField { pointer: &'static str },

    /// The inbound event could not be deserialised into the expected shape.
    #[error("Invalid event payload: {0}")]
    InvalidEvent(#[source] serde_json::Error),

    /// The object key does not live under the expected upload prefix.
    #[error("Object key '{key}' is not under the '{prefix}' prefix")]
    UnexpectedKeyLayout { key: String, prefix: String },

    // ── External services ─────────────────────────────────────────────────
    #[error(transparent)]
    Service(#[from] ServiceError),

    // ── PDF errors ────────────────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium or ship the library in a Lambda layer."
    )]
    PdfiumBindingFailed(String),

    /// pdfium could not open the downloaded document.
    #[error("PDF '{path}' could not be loaded: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// pdfium returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    /// A rendered page could not be encoded as JPEG.
    #[error("Failed to encode page {page} as JPEG: {source}")]
    ImageEncode {
        page: usize,
        #[source]
        source: image::ImageError,
    },

    // ── Model errors ──────────────────────────────────────────────────────
    /// The model runtime answered with a non-null `error` field.
    #[error("Text generation error. Error is {0}")]
    Generation(String),

    /// The model response body was not the expected JSON document.
    #[error("Malformed model response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    // ── Plumbing ──────────────────────────────────────────────────────────
    #[error("Failed to serialise workflow input: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Scratch file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Builder validation or environment parsing failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
