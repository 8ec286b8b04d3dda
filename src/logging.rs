//! `tracing` subscriber setup shared by the binaries.
//!
//! Lambda ships stdout/stderr to CloudWatch, where one JSON object per line is
//! searchable with Logs Insights; the CLI prints plain lines to stderr.

use tracing_subscriber::EnvFilter;

/// Output style for [`init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Plain,
    /// One JSON object per event, no ANSI colours.
    Json,
}

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Plain => builder.init(),
        LogFormat::Json => builder
            .json()
            .with_ansi(false)
            .with_current_span(false)
            .without_time()
            .init(),
    }
}
