use qrcode::{Color, EcLevel, QrCode};
use rqrr::PreparedImage;
use tracing::{debug, warn};

use super::ModuleMatrixCodec;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, ModuleMatrix};

/// Light modules kept around the symbol on every side
pub const QUIET_ZONE: usize = 4;

/// QR codec backed by `qrcode` for encoding and `rqrr` for decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrCodec {
    ec_level: ECLevel,
    quiet_zone: usize,
}

impl Default for QrCodec {
    fn default() -> Self {
        Self::new(ECLevel::default())
    }
}

impl QrCodec {
    /// Codec encoding at `ec_level` with the standard quiet zone
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            ec_level,
            quiet_zone: QUIET_ZONE,
        }
    }

    /// Override the quiet zone width, in modules
    pub fn with_quiet_zone(mut self, modules: usize) -> Self {
        self.quiet_zone = modules;
        self
    }

    /// Error correction level used when encoding
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }
}

fn to_qrcode_level(level: ECLevel) -> EcLevel {
    match level {
        ECLevel::L => EcLevel::L,
        ECLevel::M => EcLevel::M,
        ECLevel::Q => EcLevel::Q,
        ECLevel::H => EcLevel::H,
    }
}

impl ModuleMatrixCodec for QrCodec {
    fn encode(&self, text: &str, width: usize, height: usize) -> Result<ModuleMatrix> {
        if text.is_empty() {
            return Err(QrError::Encoding("found empty contents".into()));
        }

        let code = QrCode::with_error_correction_level(text, to_qrcode_level(self.ec_level))
            .map_err(|e| QrError::Encoding(format!("QR code generation failed: {e}")))?;

        let symbol = code.width();
        let with_quiet = symbol + 2 * self.quiet_zone;
        let out_width = width.max(with_quiet);
        let out_height = height.max(with_quiet);

        // Whole-pixel scale factor; leftover space is split around the symbol
        let multiple = (out_width / with_quiet).min(out_height / with_quiet);
        let left = (out_width - symbol * multiple) / 2;
        let top = (out_height - symbol * multiple) / 2;

        debug!(
            symbol,
            multiple,
            out_width,
            out_height,
            ec_level = %self.ec_level,
            "encoded QR symbol"
        );

        let mut matrix = ModuleMatrix::new(out_width, out_height);
        for qy in 0..symbol {
            for qx in 0..symbol {
                if code[(qx, qy)] != Color::Dark {
                    continue;
                }
                for dy in 0..multiple {
                    for dx in 0..multiple {
                        matrix.set(left + qx * multiple + dx, top + qy * multiple + dy, true);
                    }
                }
            }
        }

        Ok(matrix)
    }

    fn decode(&self, bitmap: &ModuleMatrix) -> Result<String> {
        let mut img =
            PreparedImage::prepare_from_bitmap(bitmap.width(), bitmap.height(), |x, y| {
                bitmap.get(x, y)
            });
        let grids = img.detect_grids();
        debug!(grids = grids.len(), "located candidate symbols");

        for grid in &grids {
            match grid.decode() {
                Ok((_, content)) => return Ok(content),
                Err(e) => warn!(error = ?e, "candidate symbol failed to decode"),
            }
        }

        Err(QrError::NotFound)
    }
}
