//! Image encoding: `DynamicImage` → JPEG bytes for upload.
//!
//! Page images go to Textract, which accepts JPEG and PNG. JPEG keeps a
//! scanned-page upload small; at the default quality text edges stay sharp
//! enough for line detection.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use tracing::debug;

/// Encode a rasterised page as JPEG at the given quality (1–100).
///
/// pdfium renders RGBA; JPEG has no alpha channel so the image is flattened
/// to RGB first.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality).encode_image(&rgb)?;

    debug!("Encoded {}x{} page → {} bytes JPEG", rgb.width(), rgb.height(), buf.len());
    Ok(buf)
}
