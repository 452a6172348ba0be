//! Icon compositing
//!
//! The output is split into three zones around the center:
//!
//! ```text
//!   module zone
//!   +---------------------+
//!   |  border (white)     |
//!   |  +---------------+  |
//!   |  |  icon pixels  |  |
//!   |  +---------------+  |
//!   +---------------------+
//! ```
//!
//! The icon zone is half-open, `[center - half, center + half)`, so it is
//! exactly `2 * half_icon_width` wide. With an odd icon width (33 at the default
//! 200px output) the last column and row of the scaled icon are never drawn.

use tracing::debug;

use super::rasterize::rasterize;
use crate::config::QrConfig;
use crate::models::{BLACK, ModuleMatrix, PixelBuffer, WHITE};

/// Which part of the output a pixel belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Inside the icon, at icon coordinates (`ix`, `iy`)
    Icon {
        /// Icon column
        ix: usize,
        /// Icon row
        iy: usize,
    },
    /// White frame around the icon
    Border,
    /// Everything else; colored from the module matrix
    Module,
}

/// Icon and border rectangles for one output size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    width: usize,
    height: usize,
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
    border: i64,
}

impl Geometry {
    /// Zones for the configured output size, icon size and border
    pub fn new(config: &QrConfig) -> Self {
        Self::centered(
            config.output_width,
            config.output_height,
            config.half_icon_width() as i64,
            config.half_icon_height() as i64,
            config.border_thickness as i64,
        )
    }

    fn centered(width: usize, height: usize, half_icon_w: i64, half_icon_h: i64, border: i64) -> Self {
        let half_w = (width / 2) as i64;
        let half_h = (height / 2) as i64;
        Self {
            width,
            height,
            left: half_w - half_icon_w,
            top: half_h - half_icon_h,
            right: half_w + half_icon_w,
            bottom: half_h + half_icon_h,
            border,
        }
    }

    /// Same icon and border sizes, centered on a `width` x `height` canvas
    pub fn recentered(&self, width: usize, height: usize) -> Self {
        Self::centered(
            width,
            height,
            (self.right - self.left) / 2,
            (self.bottom - self.top) / 2,
            self.border,
        )
    }

    /// Output width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Output height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Top-left corner of the icon zone
    pub fn icon_origin(&self) -> (usize, usize) {
        (self.left as usize, self.top as usize)
    }

    /// Classify a pixel into exactly one zone
    pub fn classify(&self, x: usize, y: usize) -> Zone {
        let (x, y) = (x as i64, y as i64);
        let (l, t, r, b, bw) = (self.left, self.top, self.right, self.bottom, self.border);

        if x >= l && x < r && y >= t && y < b {
            return Zone::Icon {
                ix: (x - l) as usize,
                iy: (y - t) as usize,
            };
        }

        let rows = y >= t - bw && y < b + bw;
        let cols = x >= l - bw && x < r + bw;
        let left_strip = x >= l - bw && x < l && rows;
        let right_strip = x >= r && x < r + bw && rows;
        let top_strip = y >= t - bw && y < t && cols;
        let bottom_strip = y >= b && y < b + bw && cols;

        if left_strip || right_strip || top_strip || bottom_strip {
            Zone::Border
        } else {
            Zone::Module
        }
    }
}

/// Merges a module matrix with a pre-scaled icon
#[derive(Debug, Clone, Copy)]
pub struct IconCompositor {
    geometry: Geometry,
}

impl IconCompositor {
    /// Compositor for the configured geometry
    pub fn new(config: &QrConfig) -> Self {
        Self {
            geometry: Geometry::new(config),
        }
    }

    /// Zone layout used by this compositor
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Render `matrix`, with `icon` drawn over the center when present.
    ///
    /// Without an icon this is [`rasterize`] and the output keeps the matrix size.
    /// With an icon the output is the configured size, grown to the matrix size
    /// when the symbol needs more room, and the icon sits at the canvas center.
    /// Icon pixels beyond a too-small icon are left white.
    pub fn compose(&self, matrix: &ModuleMatrix, icon: Option<&PixelBuffer>) -> PixelBuffer {
        let Some(icon) = icon else {
            return rasterize(matrix);
        };

        let width = self.geometry.width.max(matrix.width());
        let height = self.geometry.height.max(matrix.height());
        let geometry = if (width, height) == (self.geometry.width, self.geometry.height) {
            self.geometry
        } else {
            self.geometry.recentered(width, height)
        };
        debug!(
            width,
            height,
            icon_width = icon.width(),
            icon_height = icon.height(),
            "compositing icon"
        );

        let mut buffer = PixelBuffer::new(width, height, WHITE);
        for y in 0..height {
            for x in 0..width {
                let color = match geometry.classify(x, y) {
                    Zone::Icon { ix, iy } if ix < icon.width() && iy < icon.height() => {
                        icon.get(ix, iy)
                    }
                    Zone::Icon { .. } | Zone::Border => WHITE,
                    Zone::Module if matrix.get(x, y) => BLACK,
                    Zone::Module => WHITE,
                };
                buffer.set(x, y, color);
            }
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_geometry() -> Geometry {
        Geometry::new(&QrConfig::default())
    }

    #[test]
    fn test_default_zone_bounds() {
        let g = default_geometry();
        // center 100, half icon 16 -> icon [84, 116)
        assert_eq!(g.icon_origin(), (84, 84));
        assert_eq!(g.classify(84, 84), Zone::Icon { ix: 0, iy: 0 });
        assert_eq!(g.classify(115, 115), Zone::Icon { ix: 31, iy: 31 });
        assert_eq!(g.classify(116, 100), Zone::Border);
        assert_eq!(g.classify(117, 100), Zone::Border);
        assert_eq!(g.classify(118, 100), Zone::Module);
        assert_eq!(g.classify(83, 100), Zone::Border);
        assert_eq!(g.classify(82, 100), Zone::Border);
        assert_eq!(g.classify(81, 100), Zone::Module);
    }

    #[test]
    fn test_border_corners_belong_to_border() {
        let g = default_geometry();
        assert_eq!(g.classify(82, 82), Zone::Border);
        assert_eq!(g.classify(117, 117), Zone::Border);
        assert_eq!(g.classify(82, 117), Zone::Border);
        assert_eq!(g.classify(81, 81), Zone::Module);
        assert_eq!(g.classify(118, 118), Zone::Module);
    }

    #[test]
    fn test_zone_counts_partition_the_buffer() {
        let g = default_geometry();
        let (mut icon, mut border, mut module) = (0, 0, 0);
        for y in 0..g.height() {
            for x in 0..g.width() {
                match g.classify(x, y) {
                    Zone::Icon { .. } => icon += 1,
                    Zone::Border => border += 1,
                    Zone::Module => module += 1,
                }
            }
        }
        assert_eq!(icon, 32 * 32);
        assert_eq!(border, 36 * 36 - 32 * 32);
        assert_eq!(icon + border + module, 200 * 200);
    }

    #[test]
    fn test_odd_icon_last_column_and_row_are_clipped() {
        let config = QrConfig::default();
        let mut icon = PixelBuffer::new(33, 33, 0x00FF00);
        for i in 0..33 {
            icon.set(32, i, 0xFF0000);
            icon.set(i, 32, 0xFF0000);
        }
        let matrix = ModuleMatrix::new(200, 200);
        let out = IconCompositor::new(&config).compose(&matrix, Some(&icon));

        // The red last column/row of the icon never reaches the output
        assert!(out.as_slice().iter().all(|&p| p != 0xFF0000));
        assert_eq!(out.get(115, 115), 0x00FF00);
        assert_eq!(out.get(116, 115), WHITE);
    }

    #[test]
    fn test_compose_without_icon_delegates_to_rasterizer() {
        let config = QrConfig::default();
        let matrix = ModuleMatrix::filled(200, 200, true);
        let out = IconCompositor::new(&config).compose(&matrix, None);
        assert!(out.as_slice().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn test_compose_with_icon_colors_each_zone() {
        let config = QrConfig::default();
        let matrix = ModuleMatrix::filled(200, 200, true);
        let icon = PixelBuffer::new(33, 33, 0x123456);
        let compositor = IconCompositor::new(&config);
        let out = compositor.compose(&matrix, Some(&icon));

        assert_eq!((out.width(), out.height()), (200, 200));
        for y in 0..200 {
            for x in 0..200 {
                let expected = match compositor.geometry().classify(x, y) {
                    Zone::Icon { .. } => 0x123456,
                    Zone::Border => WHITE,
                    Zone::Module => BLACK,
                };
                assert_eq!(out.get(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_custom_border_thickness() {
        let config = QrConfig::default().with_border(5);
        let g = Geometry::new(&config);
        assert_eq!(g.classify(79, 100), Zone::Border);
        assert_eq!(g.classify(78, 100), Zone::Module);
        assert_eq!(g.classify(120, 100), Zone::Border);
        assert_eq!(g.classify(121, 100), Zone::Module);
    }

    #[test]
    fn test_zero_border_leaves_no_frame() {
        let config = QrConfig::default().with_border(0);
        let g = Geometry::new(&config);
        assert_eq!(g.classify(83, 100), Zone::Module);
        assert_eq!(g.classify(116, 100), Zone::Module);
        assert_eq!(g.classify(84, 100), Zone::Icon { ix: 0, iy: 16 });
    }

    #[test]
    fn test_non_square_zone_uses_height_for_rows() {
        // 300x120: icon 50x20, centered on (150, 60)
        let config = QrConfig::default().with_size(300, 120);
        let g = Geometry::new(&config);
        assert_eq!(g.icon_origin(), (125, 50));
        assert_eq!(g.classify(125, 50), Zone::Icon { ix: 0, iy: 0 });
        assert_eq!(g.classify(174, 69), Zone::Icon { ix: 49, iy: 19 });
        assert_eq!(g.classify(150, 70), Zone::Border);
        assert_eq!(g.classify(150, 71), Zone::Border);
        assert_eq!(g.classify(150, 72), Zone::Module);
        assert_eq!(g.classify(150, 48), Zone::Border);
        assert_eq!(g.classify(150, 47), Zone::Module);
        // A width-derived half height would reach up to row 35
        assert_eq!(g.classify(150, 40), Zone::Module);
        assert_eq!(g.classify(175, 60), Zone::Border);
        assert_eq!(g.classify(177, 60), Zone::Module);

        let (mut icon, mut border) = (0, 0);
        for y in 0..120 {
            for x in 0..300 {
                match g.classify(x, y) {
                    Zone::Icon { .. } => icon += 1,
                    Zone::Border => border += 1,
                    Zone::Module => {}
                }
            }
        }
        assert_eq!(icon, 50 * 20);
        assert_eq!(border, 54 * 24 - 50 * 20);
    }

    #[test]
    fn test_compose_grows_to_oversized_matrix() {
        let config = QrConfig::default().with_size(60, 60);
        let matrix = ModuleMatrix::filled(69, 69, true);
        let icon = PixelBuffer::new(10, 10, 0x123456);
        let compositor = IconCompositor::new(&config);
        let out = compositor.compose(&matrix, Some(&icon));

        assert_eq!((out.width(), out.height()), (69, 69));
        // Modules at the far edge survive
        assert_eq!(out.get(68, 68), BLACK);
        assert_eq!(out.get(68, 0), BLACK);
        // Icon is centered on the matrix: center 34, half icon 5 -> [29, 39)
        let g = compositor.geometry().recentered(69, 69);
        assert_eq!(g.icon_origin(), (29, 29));
        assert_eq!(out.get(29, 29), 0x123456);
        assert_eq!(out.get(38, 38), 0x123456);
        assert_eq!(out.get(39, 34), WHITE);
        assert_eq!(out.get(41, 34), BLACK);
    }
}
