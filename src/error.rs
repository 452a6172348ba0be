//! Error types for QR generation and reading

use thiserror::Error;

/// Errors reported by the encode, compositing and decode stages
#[derive(Debug, Error)]
pub enum QrError {
    /// Content could not be encoded (empty, or exceeds symbol capacity)
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Icon or input image could not be read or decoded
    #[error("Image read error: {0}")]
    ImageRead(String),

    /// Pixel buffer could not be encoded into the requested raster format
    #[error("Image write error: {0}")]
    ImageWrite(String),

    /// No decodable QR symbol was found in the image
    #[error("No QR code found")]
    NotFound,

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QrError {
    /// True when decoding ran but found no symbol.
    ///
    /// This is an expected outcome for arbitrary input images rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QrError::NotFound)
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, QrError>;
