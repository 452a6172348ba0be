//! Symbol encode/decode capability
//!
//! The compositing pipeline only needs two things from the symbology: a module
//! matrix for some text, and text back from a binarized bitmap. [`ModuleMatrixCodec`]
//! is that seam; [`QrCodec`] fills it with the `qrcode` and `rqrr` crates.

pub mod qr;

pub use qr::QrCodec;

use crate::error::Result;
use crate::models::ModuleMatrix;

/// Encode text into modules and decode binarized bitmaps back into text
pub trait ModuleMatrixCodec {
    /// Encode `text` into a matrix of at least `width` x `height` modules.
    ///
    /// Fails with [`QrError::Encoding`](crate::QrError::Encoding) when the text
    /// cannot be represented.
    fn encode(&self, text: &str, width: usize, height: usize) -> Result<ModuleMatrix>;

    /// Locate and decode a symbol in a binarized bitmap (`true` = black).
    ///
    /// Fails with [`QrError::NotFound`](crate::QrError::NotFound) when no symbol
    /// can be located or decoded.
    fn decode(&self, bitmap: &ModuleMatrix) -> Result<String>;
}
