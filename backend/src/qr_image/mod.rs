//! QR code rendering to in-memory PNG images
mod error;

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

pub use error::{QrImageError, QrImageResult};

/// Content type of the rendered images
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Pixel size of a single module
pub const MODULE_SIZE_PX: u32 = 10;

/// Renders text into black-on-white QR code PNGs
///
/// Codes are drawn with the standard 4-module light border. The version is picked as the smallest one that fits the payload at the
/// configured error correction level.
#[derive(Debug, Clone, Copy)]
pub struct QrImageEncoder {
    ec_level: EcLevel,
    module_size: u32,
}

impl Default for QrImageEncoder {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::L,
            module_size: MODULE_SIZE_PX,
        }
    }
}

impl QrImageEncoder {
    /// Encodes `text` into a PNG image
    ///
    /// # Errors
    ///
    /// Returns `QrImageError::Encode` if the text exceeds the QR capacity
    /// Returns `QrImageError::Png` if the PNG encoder fails
    pub fn encode_png(&self, text: &str) -> QrImageResult<Vec<u8>> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), self.ec_level)?;

        let image = code
            .render::<Luma<u8>>()
            .dark_color(Luma([0]))
            .light_color(Luma([255]))
            .quiet_zone(true)
            .module_dimensions(self.module_size, self.module_size)
            .build();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(png)
    }
}
