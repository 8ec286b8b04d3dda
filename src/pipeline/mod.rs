//! Pipeline stages.
//!
//! ## Data Flow
//!
//! ```text
//!  S3 upload ──▶ trigger ──▶ rasterize ──▶ Step Functions run
//!                 (type      (scratch →       │
//!                  check)     render →        ▼
//!                             encode →     steps: extract ──▶ summarize
//!                             upload)             (Textract)   (Bedrock)
//! ```
//!
//! 1. [`trigger`]   - file-type dispatch and state machine start
//! 2. [`rasterize`] - download, render and upload page images
//! 3. [`scratch`]   - scoped local copy of the PDF
//! 4. [`render`]    - pdfium rendering; runs in `spawn_blocking`
//! 5. [`encode`]    - JPEG encoding of rendered pages
//! 6. [`extract`]   - LINE text from Textract
//! 7. [`summarize`] - Titan summary request and result logging
//! 8. [`steps`]     - task handlers wired into the state machine

pub mod encode;
pub mod extract;
pub mod rasterize;
pub mod render;
pub mod scratch;
pub mod steps;
pub mod summarize;
pub mod trigger;
