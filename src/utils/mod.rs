//! Image processing helpers for the decode path
//!
//! - Grayscale conversion (RGB to luminance)
//! - Binarization (block-local thresholds, Otsu and fixed threshold)

pub mod binarization;
pub mod grayscale;
