//! Host-facing signature contract.
//!
//! A form holds a signature surface through [`SignatureControl`] only: it can
//! reset it, ask whether anything was drawn, and take the finished image. The
//! surface's stroke state stays private to the implementation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder shown over an empty surface.
pub const SIGN_HERE_HINT: &str = "Tanda tangan di sini";

/// Label of the clear button rendered next to the surface.
pub const CLEAR_LABEL: &str = "Bersihkan";

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Narrow control interface a host form uses to drive a signature surface.
pub trait SignatureControl {
    /// Erase all ink and cancel any stroke in progress. Idempotent.
    fn clear(&mut self);

    /// `true` until the first stroke begins, and again after `clear`.
    fn is_empty(&self) -> bool;

    /// Encoded image of the current surface, or `None` when nothing was drawn.
    fn export_image(&self) -> Option<SignatureImage>;
}

#[derive(Debug, Error)]
pub enum SignatureImageError {
    #[error("not a PNG data URL")]
    NotPngDataUrl,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A lossless PNG carried as a `data:image/png;base64,...` URI.
///
/// This is the exact string stored in a petitioner's `signature` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureImage(String);

impl SignatureImage {
    /// Wrap encoded PNG bytes.
    pub fn from_png_bytes(png: &[u8]) -> Self {
        Self(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png)))
    }

    /// Accept a data URL produced elsewhere (e.g. `canvas.toDataURL`).
    pub fn from_data_url(url: impl Into<String>) -> Result<Self, SignatureImageError> {
        let url = url.into();
        if !url.starts_with(PNG_DATA_URL_PREFIX) {
            return Err(SignatureImageError::NotPngDataUrl);
        }
        Ok(Self(url))
    }

    pub fn as_data_url(&self) -> &str {
        &self.0
    }

    pub fn into_data_url(self) -> String {
        self.0
    }

    /// Decode the base64 payload back to raw PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, SignatureImageError> {
        let b64 = self
            .0
            .strip_prefix(PNG_DATA_URL_PREFIX)
            .ok_or(SignatureImageError::NotPngDataUrl)?;
        Ok(STANDARD.decode(b64)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn png_bytes_survive_data_url() {
        let image = SignatureImage::from_png_bytes(PNG_MAGIC);
        assert!(image.as_data_url().starts_with("data:image/png;base64,"));
        assert_eq!(image.to_png_bytes().unwrap(), PNG_MAGIC);
    }

    #[test]
    fn rejects_other_media_types() {
        let err = SignatureImage::from_data_url("data:image/jpeg;base64,AAAA").unwrap_err();
        assert!(matches!(err, SignatureImageError::NotPngDataUrl));
    }

    #[test]
    fn bad_base64_is_reported() {
        let image = SignatureImage::from_data_url("data:image/png;base64,@@@").unwrap();
        assert!(matches!(
            image.to_png_bytes(),
            Err(SignatureImageError::Base64(_))
        ));
    }
}
