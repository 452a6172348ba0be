//! Pixel buffer to text
//!
//! Pipeline: RGB -> luminance -> binarization -> symbol search and decode.
//! One attempt is made; there is no retry with a different binarizer.

use tracing::debug;

use crate::codec::ModuleMatrixCodec;
use crate::error::Result;
use crate::models::PixelBuffer;
use crate::utils::binarization::binarize;
use crate::utils::grayscale::buffer_to_grayscale;

/// Reads QR symbols out of pixel buffers through a codec
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder<C> {
    codec: C,
}

impl<C: ModuleMatrixCodec> Decoder<C> {
    /// Decoder delegating symbol search to `codec`
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Decode the symbol in `buffer`.
    ///
    /// Fails with [`QrError::NotFound`](crate::QrError::NotFound) when no symbol
    /// is found, which is the normal answer for images without one.
    pub fn decode(&self, buffer: &PixelBuffer) -> Result<String> {
        let (width, height) = (buffer.width(), buffer.height());
        let gray = buffer_to_grayscale(buffer);
        let binary = binarize(&gray, width, height);
        debug!(width, height, dark = binary.count_dark(), "binarized input");
        self.codec.decode(&binary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::QrCodec;
    use crate::models::WHITE;
    use crate::render::rasterize::rasterize;

    #[test]
    fn test_decode_rasterized_symbol() {
        let codec = QrCodec::default();
        let matrix = codec.encode("decoder", 200, 200).unwrap();
        let decoded = Decoder::new(codec).decode(&rasterize(&matrix)).unwrap();
        assert_eq!(decoded, "decoder");
    }

    #[test]
    fn test_blank_white_is_not_found() {
        let blank = PixelBuffer::new(200, 200, WHITE);
        let err = Decoder::new(QrCodec::default()).decode(&blank).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_tiny_buffer_is_not_found() {
        let tiny = PixelBuffer::new(3, 3, WHITE);
        let err = Decoder::new(QrCodec::default()).decode(&tiny).unwrap_err();
        assert!(err.is_not_found());
    }
}
