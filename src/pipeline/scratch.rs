//! Scratch storage for the downloaded PDF.
//!
//! pdfium needs a file-system path, so the upload is downloaded to local
//! disk first. The file is a `tempfile::NamedTempFile`: it is unique per
//! invocation and deleted when the [`ScratchFile`] drops, whichever way the
//! invocation exits. Warm Lambda containers reuse `/tmp`, so a leaked file
//! would survive into the next invocation.

use crate::error::PipelineError;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// A scratch file that is removed on drop.
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    /// Create an empty scratch file in `dir` with the given suffix (e.g. `".pdf"`).
    pub fn create_in(dir: &Path, suffix: &str) -> Result<Self, PipelineError> {
        let file = tempfile::Builder::new()
            .prefix("pdf_file-")
            .suffix(suffix)
            .tempfile_in(dir)?;
        debug!("Scratch file: {}", file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
