use std::io::{BufRead, Seek};
use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::codec::{ModuleMatrixCodec, QrCodec};
use crate::config::QrConfig;
use crate::decode::Decoder;
use crate::error::Result;
use crate::io;
use crate::models::PixelBuffer;
use crate::render::compose::IconCompositor;
use crate::render::scale::scale;

/// Generates and reads QR images for one configuration
#[derive(Debug, Clone)]
pub struct QrGenerator<C = QrCodec> {
    config: QrConfig,
    codec: C,
}

impl QrGenerator<QrCodec> {
    /// Generator using the `qrcode`/`rqrr` codec at the configured EC level
    pub fn new(config: QrConfig) -> Self {
        Self {
            codec: QrCodec::new(config.ec_level),
            config,
        }
    }
}

impl Default for QrGenerator<QrCodec> {
    fn default() -> Self {
        Self::new(QrConfig::default())
    }
}

impl<C: ModuleMatrixCodec + Clone> QrGenerator<C> {
    /// Generator using a custom codec
    pub fn with_codec(config: QrConfig, codec: C) -> Self {
        Self { config, codec }
    }

    /// Active configuration
    pub fn config(&self) -> &QrConfig {
        &self.config
    }

    /// Encode `text` and render it, compositing `icon` into the center when given.
    ///
    /// The output has the encoded matrix's size, which is the configured size
    /// unless the symbol needs more room; the icon is centered on that canvas.
    pub fn generate(&self, text: &str, icon: Option<&DynamicImage>) -> Result<PixelBuffer> {
        let config = &self.config;
        let matrix = self
            .codec
            .encode(text, config.output_width, config.output_height)?;

        let scaled = icon.map(|source| {
            scale(source, config.icon_width(), config.icon_height(), true)
        });
        debug!(
            len = text.len(),
            with_icon = scaled.is_some(),
            recovery_percent = config.ec_level.recovery_percent(),
            "generating QR image"
        );

        Ok(IconCompositor::new(config).compose(&matrix, scaled.as_ref()))
    }

    /// [`generate`](Self::generate) with an icon loaded from `icon_path`
    pub fn generate_with_icon_path<P: AsRef<Path>>(&self, text: &str, icon_path: P) -> Result<PixelBuffer> {
        let icon = io::read_dynamic_image(icon_path)?;
        self.generate(text, Some(&icon))
    }

    /// Generate and encode in the configured raster format
    pub fn generate_bytes(&self, text: &str, icon: Option<&DynamicImage>) -> Result<Vec<u8>> {
        let buffer = self.generate(text, icon)?;
        io::encode_image(&buffer, self.config.format)
    }

    /// Generate and write to `path` in the configured raster format
    pub fn generate_to_path<P: AsRef<Path>>(
        &self,
        text: &str,
        icon: Option<&DynamicImage>,
        path: P,
    ) -> Result<()> {
        let buffer = self.generate(text, icon)?;
        io::write_image(&buffer, path, self.config.format)
    }

    /// Decode the symbol in a pixel buffer
    pub fn read(&self, buffer: &PixelBuffer) -> Result<String> {
        Decoder::new(self.codec.clone()).decode(buffer)
    }

    /// Decode the symbol in encoded image bytes
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<String> {
        self.read(&io::decode_image(bytes)?)
    }

    /// Decode the symbol in an image file
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        self.read(&io::read_image(path)?)
    }

    /// Decode the symbol in an encoded image stream
    pub fn read_reader<R: BufRead + Seek>(&self, reader: R) -> Result<String> {
        self.read(&io::read_image_from(reader)?)
    }
}
