use image::{Rgb, RgbImage};

/// Dark module color
pub const BLACK: u32 = 0x000000;
/// Light module, border and letterbox fill color
pub const WHITE: u32 = 0xFFFFFF;

/// Row-major buffer of 24-bit RGB pixels stored as `0xRRGGBB`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Create a buffer filled with a single color
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill & WHITE; width * height],
        }
    }

    /// Buffer width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at (x, y); panics when out of range
    pub fn get(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width && y < self.height, "pixel out of range");
        self.pixels[y * self.width + x]
    }

    /// Set pixel at (x, y); panics when out of range
    pub fn set(&mut self, x: usize, y: usize, rgb: u32) {
        assert!(x < self.width && y < self.height, "pixel out of range");
        self.pixels[y * self.width + x] = rgb & WHITE;
    }

    /// Raw pixels, row-major
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    /// Pack into interleaved RGB bytes (3 bytes per pixel)
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixels.len() * 3);
        for &p in &self.pixels {
            rgb.extend_from_slice(&unpack(p));
        }
        rgb
    }

    /// Convert into an `image` crate RGB image
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Rgb(unpack(self.get(x as usize, y as usize)))
        })
    }

    /// Copy pixels from an `image` crate RGB image
    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|Rgb(c)| pack(*c)).collect();
        Self {
            width: width as usize,
            height: height as usize,
            pixels,
        }
    }
}

/// Pack an `[r, g, b]` triple into `0xRRGGBB`
pub fn pack([r, g, b]: [u8; 3]) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Unpack `0xRRGGBB` into an `[r, g, b]` triple
pub fn unpack(rgb: u32) -> [u8; 3] {
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]
}
