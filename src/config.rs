//! Output geometry and encoding settings
//!
//! A [`QrConfig`] is built once and passed into every operation. Nothing here is
//! process-wide, so several configurations can be used side by side.

use image::ImageFormat;

use crate::models::ECLevel;

/// Default output width and height in pixels
pub const DEFAULT_SIZE: usize = 200;
/// Default width of the white frame around the icon
pub const DEFAULT_BORDER: usize = 2;
/// Icon side length is this fraction (1/n) of the output side length
pub const ICON_RATIO: usize = 6;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_ec_level(name: &str, default: ECLevel) -> ECLevel {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<ECLevel>().ok())
        .unwrap_or(default)
}

/// Immutable generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrConfig {
    /// Requested output width in pixels
    pub output_width: usize,
    /// Requested output height in pixels
    pub output_height: usize,
    /// Thickness of the white frame around the icon
    pub border_thickness: usize,
    /// Error correction level used when encoding
    pub ec_level: ECLevel,
    /// Raster format for encoded output
    pub format: ImageFormat,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            output_width: DEFAULT_SIZE,
            output_height: DEFAULT_SIZE,
            border_thickness: DEFAULT_BORDER,
            ec_level: ECLevel::default(),
            format: ImageFormat::Png,
        }
    }
}

impl QrConfig {
    /// Defaults overridden by `QR_OUTPUT_WIDTH`, `QR_OUTPUT_HEIGHT`,
    /// `QR_ICON_BORDER` and `QR_EC_LEVEL`. Unparsable values are ignored.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            output_width: parse_env_usize("QR_OUTPUT_WIDTH", base.output_width),
            output_height: parse_env_usize("QR_OUTPUT_HEIGHT", base.output_height),
            border_thickness: parse_env_usize("QR_ICON_BORDER", base.border_thickness),
            ec_level: parse_env_ec_level("QR_EC_LEVEL", base.ec_level),
            format: base.format,
        }
    }

    /// Set output width and height
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.output_width = width;
        self.output_height = height;
        self
    }

    /// Set icon border thickness
    pub fn with_border(mut self, thickness: usize) -> Self {
        self.border_thickness = thickness;
        self
    }

    /// Set error correction level
    pub fn with_ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Set output raster format
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Scaled icon width
    pub fn icon_width(&self) -> usize {
        self.output_width / ICON_RATIO
    }

    /// Scaled icon height
    pub fn icon_height(&self) -> usize {
        self.output_height / ICON_RATIO
    }

    /// Half the icon width, rounded down
    pub fn half_icon_width(&self) -> usize {
        self.icon_width() / 2
    }

    /// Half the icon height, rounded down
    pub fn half_icon_height(&self) -> usize {
        self.icon_height() / 2
    }
}
