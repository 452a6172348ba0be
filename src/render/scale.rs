use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

use crate::error::Result;
use crate::io::read_dynamic_image;
use crate::models::PixelBuffer;

/// Scale `source` into a `target_width` x `target_height` box without distorting it.
///
/// A source larger than the box on either side is shrunk by one ratio, chosen from
/// its taller side: `target_height / height` when taller than wide, otherwise
/// `target_width / width`. A source that already fits is resampled to exactly the
/// box. With `fill_to_target` the result is centered on a white canvas of the
/// box size; odd leftover margins put the extra pixel after the image.
///
/// Transparent pixels are flattened onto white, so the result is fully opaque.
pub fn scale(
    source: &DynamicImage,
    target_width: usize,
    target_height: usize,
    fill_to_target: bool,
) -> PixelBuffer {
    let flat = flatten_onto_white(source);
    let (src_w, src_h) = (flat.width() as usize, flat.height() as usize);

    let intermediate = if src_h > target_height || src_w > target_width {
        // Integer form of `dim * ratio`, truncated like the ratio math would be
        let (w, h) = if src_h > src_w {
            (src_w * target_height / src_h, target_height)
        } else {
            (target_width, src_h * target_width / src_w)
        };
        let (w, h) = (w.max(1) as u32, h.max(1) as u32);
        debug!(src_w, src_h, w, h, "shrinking icon");
        imageops::resize(&flat, w, h, FilterType::Triangle)
    } else {
        imageops::resize(
            &flat,
            target_width as u32,
            target_height as u32,
            FilterType::Lanczos3,
        )
    };

    if !fill_to_target {
        return PixelBuffer::from_rgb_image(&intermediate);
    }

    let (iw, ih) = (intermediate.width() as i64, intermediate.height() as i64);
    let (tw, th) = (target_width as i64, target_height as i64);
    let (x, y) = if iw == tw {
        (0, (th - ih) / 2)
    } else {
        ((tw - iw) / 2, 0)
    };

    let mut canvas = RgbImage::from_pixel(target_width as u32, target_height as u32, Rgb([255; 3]));
    imageops::overlay(&mut canvas, &intermediate, x, y);
    PixelBuffer::from_rgb_image(&canvas)
}

/// Read an image file and [`scale`] it.
///
/// Fails with [`QrError::ImageRead`](crate::QrError::ImageRead) when the file
/// cannot be opened or decoded.
pub fn scale_path<P: AsRef<Path>>(
    path: P,
    target_width: usize,
    target_height: usize,
    fill_to_target: bool,
) -> Result<PixelBuffer> {
    let source = read_dynamic_image(path)?;
    Ok(scale(&source, target_width, target_height, fill_to_target))
}

fn flatten_onto_white(source: &DynamicImage) -> RgbImage {
    let rgba = source.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |c: u8| -> u8 {
            let a = a as u32;
            ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8
        };
        Rgb([blend(r), blend(g), blend(b)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WHITE;
    use image::{Rgba, RgbaImage};

    const RED: u32 = 0xFF0000;

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 0, 0])))
    }

    #[test]
    fn test_wide_source_is_letterboxed_vertically() {
        let out = scale(&solid(400, 100), 30, 30, true);
        assert_eq!((out.width(), out.height()), (30, 30));

        // ratio 30/400 -> 30x7, offset (30 - 7) / 2 = 11
        for y in 0..11 {
            assert_eq!(out.get(15, y), WHITE, "row {y} should be padding");
        }
        for y in 11..18 {
            assert_eq!(out.get(0, y), RED, "row {y} should be image");
            assert_eq!(out.get(29, y), RED, "row {y} should be image");
        }
        // Odd leftover: one more padding row at the bottom
        for y in 18..30 {
            assert_eq!(out.get(15, y), WHITE, "row {y} should be padding");
        }
    }

    #[test]
    fn test_tall_source_is_letterboxed_horizontally() {
        let out = scale(&solid(50, 200), 40, 40, true);
        assert_eq!((out.width(), out.height()), (40, 40));
        // ratio 40/200 -> 10x40, offset (40 - 10) / 2 = 15
        assert_eq!(out.get(14, 20), WHITE);
        assert_eq!(out.get(15, 20), RED);
        assert_eq!(out.get(24, 20), RED);
        assert_eq!(out.get(25, 20), WHITE);
    }

    #[test]
    fn test_without_fill_keeps_intermediate_size() {
        let out = scale(&solid(400, 100), 30, 30, false);
        assert_eq!((out.width(), out.height()), (30, 7));
    }

    #[test]
    fn test_small_source_is_resampled_to_target() {
        let out = scale(&solid(10, 5), 33, 33, false);
        assert_eq!((out.width(), out.height()), (33, 33));
        assert_eq!(out.get(16, 16), RED);
    }

    #[test]
    fn test_fill_always_yields_target_size() {
        for (w, h) in [(1, 1), (1, 500), (500, 1), (33, 33), (34, 33), (999, 998), (7, 64)] {
            let out = scale(&solid(w, h), 33, 33, true);
            assert_eq!((out.width(), out.height()), (33, 33), "source {w}x{h}");
        }
    }

    #[test]
    fn test_transparency_is_flattened_onto_white() {
        let clear = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 0]));
        let out = scale(&DynamicImage::ImageRgba8(clear), 10, 10, true);
        assert!(out.as_slice().iter().all(|&p| p == WHITE));
    }

    #[test]
    fn test_scale_path_reports_unreadable_source() {
        let err = scale_path("/nonexistent/icon.png", 33, 33, true).unwrap_err();
        assert!(matches!(err, crate::QrError::ImageRead(_)));
    }
}
