//! qr_icon - QR code images with a centered icon
//!
//! Encodes text into a QR module matrix, optionally composites a letterboxed icon
//! into the center behind a white frame, and renders the result to pixels. The
//! reverse path reads text back out of a pixel image.
//!
//! ```no_run
//! let buffer = qr_icon::generate("https://example.com")?;
//! assert_eq!(qr_icon::read(&buffer)?, "https://example.com");
//! # Ok::<(), qr_icon::QrError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Symbol encode/decode capability (`qrcode` + `rqrr`)
pub mod codec;
/// Output geometry and encoding settings
pub mod config;
/// Pixel buffer to text
pub mod decode;
/// Error types
pub mod error;
/// Generate/read orchestration
pub mod generator;
/// Raster image container I/O
pub mod io;
/// Core data structures (ModuleMatrix, PixelBuffer, ECLevel)
pub mod models;
/// Rasterizing, icon scaling and compositing
pub mod render;
/// Utility functions (grayscale, binarization)
pub mod utils;

pub use codec::{ModuleMatrixCodec, QrCodec};
pub use config::QrConfig;
pub use decode::Decoder;
pub use error::{QrError, Result};
pub use generator::QrGenerator;
pub use models::{BLACK, ECLevel, ModuleMatrix, PixelBuffer, WHITE};

use image::DynamicImage;

/// Generate a QR image for `text` with the default configuration
pub fn generate(text: &str) -> Result<PixelBuffer> {
    QrGenerator::new(QrConfig::default()).generate(text, None)
}

/// Generate a QR image for `text` with `icon` composited into the center
pub fn generate_with_icon(text: &str, icon: &DynamicImage) -> Result<PixelBuffer> {
    QrGenerator::new(QrConfig::default()).generate(text, Some(icon))
}

/// Read the text of the QR symbol in `buffer`
pub fn read(buffer: &PixelBuffer) -> Result<String> {
    QrGenerator::new(QrConfig::default()).read(buffer)
}
