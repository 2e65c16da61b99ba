//! Pixel buffer → PNG data URL.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use petition_core::SignatureImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Encode `buffer` losslessly as PNG and wrap it as a data URL.
pub fn encode_png(buffer: &RgbaImage) -> Result<SignatureImage, EncodeError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        buffer.as_raw(),
        buffer.width(),
        buffer.height(),
        ExtendedColorType::Rgba8,
    )?;
    log::trace!("encoded {}x{} PNG, {} bytes", buffer.width(), buffer.height(), png.len());
    Ok(SignatureImage::from_png_bytes(&png))
}
