//! Luminance conversion for the decode path
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
use crate::models::PixelBuffer;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

#[inline]
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8;
    lum.min(255) as u8
}

/// Convert RGB image to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    rgb.chunks_exact(3)
        .take(pixel_count)
        .map(|px| luminance(px[0], px[1], px[2]))
        .collect()
}

/// Luminance of every pixel in a [`PixelBuffer`], row-major
pub fn buffer_to_grayscale(buffer: &PixelBuffer) -> Vec<u8> {
    buffer
        .as_slice()
        .iter()
        .map(|&p| luminance((p >> 16) as u8, (p >> 8) as u8, p as u8))
        .collect()
}
