//! Raster image container I/O
//!
//! Thin plumbing between encoded image files/bytes and [`PixelBuffer`]. Every read
//! failure, including a missing file, is reported as
//! [`QrError::ImageRead`] so callers can tell a bad image from bad content.

use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

use image::{DynamicImage, ImageError, ImageFormat, ImageReader};

use crate::error::{QrError, Result};
use crate::models::PixelBuffer;

fn read_error(e: ImageError) -> QrError {
    QrError::ImageRead(e.to_string())
}

fn write_error(e: ImageError) -> QrError {
    match e {
        ImageError::IoError(io) => QrError::Io(io),
        other => QrError::ImageWrite(other.to_string()),
    }
}

/// Open and decode an image file, format guessed from its content
pub fn read_dynamic_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    ImageReader::open(path)
        .map_err(|e| QrError::ImageRead(format!("{}: {e}", path.display())))?
        .with_guessed_format()
        .map_err(|e| QrError::ImageRead(format!("{}: {e}", path.display())))?
        .decode()
        .map_err(read_error)
}

/// Decode an in-memory encoded image
pub fn decode_dynamic_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(read_error)
}

/// Decode an image from any seekable reader
pub fn read_image_from<R: BufRead + Seek>(reader: R) -> Result<PixelBuffer> {
    let image = ImageReader::new(reader)
        .with_guessed_format()
        .map_err(|e| QrError::ImageRead(e.to_string()))?
        .decode()
        .map_err(read_error)?;
    Ok(PixelBuffer::from_rgb_image(&image.to_rgb8()))
}

/// Read an image file into a pixel buffer
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let image = read_dynamic_image(path)?;
    Ok(PixelBuffer::from_rgb_image(&image.to_rgb8()))
}

/// Decode encoded image bytes into a pixel buffer
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = decode_dynamic_image(bytes)?;
    Ok(PixelBuffer::from_rgb_image(&image.to_rgb8()))
}

/// Encode a pixel buffer in `format`
pub fn encode_image(buffer: &PixelBuffer, format: ImageFormat) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(buffer.to_rgb_image())
        .write_to(&mut out, format)
        .map_err(write_error)?;
    Ok(out.into_inner())
}

/// Encode a pixel buffer in `format` and write it to `path`
pub fn write_image<P: AsRef<Path>>(buffer: &PixelBuffer, path: P, format: ImageFormat) -> Result<()> {
    let bytes = encode_image(buffer, format)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
