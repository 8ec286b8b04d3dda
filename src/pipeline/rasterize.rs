//! Upload rasterisation: PDF in the bucket → one JPEG per page in the bucket.
//!
//! Page images are written under a per-run directory named after the current
//! minute (`202403151042/report-page-1.jpg`, …). The returned manifest lists
//! the filenames in page order and becomes the orchestration run input.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::output::{ConversionManifest, StorageEventRef};
use crate::pipeline::scratch::ScratchFile;
use crate::services::{Clock, ObjectStore, PageRasterizer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Downloads an uploaded PDF, rasterises it and uploads the page images.
#[derive(Clone)]
pub struct PdfConverter {
    store: Arc<dyn ObjectStore>,
    rasterizer: Arc<dyn PageRasterizer>,
    clock: Arc<dyn Clock>,
    upload_prefix: String,
    path_format: String,
    scratch_dir: PathBuf,
}

impl std::fmt::Debug for PdfConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfConverter")
            .field("upload_prefix", &self.upload_prefix)
            .field("path_format", &self.path_format)
            .field("scratch_dir", &self.scratch_dir)
            .finish_non_exhaustive()
    }
}

impl PdfConverter {
    pub fn new(
        config: &PipelineConfig,
        store: Arc<dyn ObjectStore>,
        rasterizer: Arc<dyn PageRasterizer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            rasterizer,
            clock,
            upload_prefix: config.upload_prefix.clone(),
            path_format: config.path_format.clone(),
            scratch_dir: config.scratch_dir.clone(),
        }
    }

    /// Convert the uploaded PDF into page images.
    ///
    /// # Errors
    /// Any key-layout, download, render or upload failure is returned as-is;
    /// no partial manifest is produced.
    pub async fn convert(&self, object: &StorageEventRef) -> Result<ConversionManifest, PipelineError> {
        let start = Instant::now();
        let base = page_basename(&object.key, &self.upload_prefix)?;

        // ── Step 1: Download to scratch ──────────────────────────────────
        let scratch = ScratchFile::create_in(&self.scratch_dir, ".pdf")?;
        let bytes = self
            .store
            .download_to(&object.bucket, &object.key, scratch.path())
            .await?;
        info!("Downloaded s3://{} ({} bytes)", object.composite_id, bytes);

        // ── Step 2: Rasterise ────────────────────────────────────────────
        let pages = self.rasterizer.rasterize(scratch.path()).await?;
        info!("Rendered {} pages", pages.len());

        // ── Step 3: Upload in page order ─────────────────────────────────
        let path_prefix = self.clock.now().format(&self.path_format).to_string();
        let filenames = (1..=pages.len()).map(|n| page_filename(&base, n)).collect();
        let manifest = ConversionManifest::new(object.bucket.clone(), path_prefix, filenames);

        for (page_num, (key, jpeg)) in manifest.object_keys().zip(pages).enumerate() {
            debug!("Uploading page {} → s3://{}/{}", page_num + 1, object.bucket, key);
            self.store
                .put_object(&object.bucket, &key, jpeg, IMAGE_CONTENT_TYPE)
                .await?;
        }

        info!(
            "Converted {} into {} images under {}/ in {}ms",
            object.key,
            manifest.produced_object_keys.len(),
            manifest.path_prefix,
            start.elapsed().as_millis()
        );

        // `scratch` drops here and on every early return above.
        Ok(manifest)
    }
}

/// `<base>-page-<n>.jpg`, 1-indexed.
pub fn page_filename(base: &str, page_num: usize) -> String {
    format!("{}-page-{}.jpg", base, page_num)
}

/// Strip the upload prefix and the extension: `upload/my-file.pdf` → `my-file`.
///
/// Keys outside the prefix are rejected rather than guessed at; for nested
/// keys (`upload/a/b.pdf`) the last path segment is used.
///
/// Only the final extension is removed, so `upload/a.b.pdf` yields `a.b` and
/// page keys look like `a.b-page-1.jpg`. Earlier deployments cut at the first
/// dot (`a-page-1.jpg`); consumers matching on page names should expect the
/// longer form.
pub fn page_basename(key: &str, upload_prefix: &str) -> Result<String, PipelineError> {
    let layout_err = || PipelineError::UnexpectedKeyLayout {
        key: key.to_string(),
        prefix: upload_prefix.to_string(),
    };

    let rest = key.strip_prefix(upload_prefix).ok_or_else(layout_err)?;
    let filename = rest.rsplit('/').next().unwrap_or(rest);
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(layout_err)
}
