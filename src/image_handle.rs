//! Decoded image handles for tokens and the map background.
//!
//! The engine never draws pixels; it only needs to know that an upload decoded
//! successfully, its dimensions (for background placement), and a `data:` URI
//! the host can hand to its renderer or persist as `imgSrc`.

#[cfg(test)]
#[path = "image_handle_test.rs"]
mod image_handle_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::MapError;

/// A successfully decoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// `data:<mime>;base64,...` URI carrying the original encoded bytes.
    pub src: String,
}

impl ImageHandle {
    /// Decode raw uploaded bytes (PNG, JPEG, GIF, WebP).
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ImageDecodeFailure`] if the format is unknown or the
    /// bytes are corrupt.
    pub fn decode(bytes: &[u8]) -> Result<Self, MapError> {
        let format = ::image::guess_format(bytes).map_err(|e| MapError::ImageDecodeFailure(e.to_string()))?;
        let decoded = ::image::load_from_memory_with_format(bytes, format)
            .map_err(|e| MapError::ImageDecodeFailure(e.to_string()))?;
        let src = format!("data:{};base64,{}", format.to_mime_type(), STANDARD.encode(bytes));
        Ok(Self { width: decoded.width(), height: decoded.height(), src })
    }

    /// Decode a `data:` URI as produced by a browser file reader or a saved map.
    ///
    /// Only base64 payloads are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ImageDecodeFailure`] for non-`data:` URIs, non-base64
    /// payloads, invalid base64, or undecodable image bytes.
    pub fn from_data_uri(uri: &str) -> Result<Self, MapError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| MapError::ImageDecodeFailure("not a data: URI".into()))?;
        let (meta, payload) =
            rest.split_once(',').ok_or_else(|| MapError::ImageDecodeFailure("data URI has no payload".into()))?;
        if !meta.split(';').any(|part| part == "base64") {
            return Err(MapError::ImageDecodeFailure("data URI payload is not base64".into()));
        }
        let bytes = STANDARD.decode(payload.trim()).map_err(|e| MapError::ImageDecodeFailure(e.to_string()))?;
        Self::decode(&bytes)
    }

    /// Width over height; `1.0` for a degenerate image.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}
