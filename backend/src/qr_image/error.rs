//! Error types for QR code rendering

use thiserror::Error;

/// Result type for QR code rendering
pub type QrImageResult<T> = Result<T, QrImageError>;

/// Errors that can occur while turning text into a PNG
#[derive(Error, Debug)]
pub enum QrImageError {
    /// The payload does not fit in any QR version at the configured level
    #[error("QR encoding error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// The rasterized code could not be written as PNG
    #[error("PNG encoding error: {0}")]
    Png(#[from] image::ImageError),
}
