//! Client-side image downscaling for publication.
//!
//! Staged images arrive as base64 `data:` URIs of their raw bytes. Before an
//! album is persisted, every image is re-encoded through [`MediaResizer`] so
//! the catalog stays within its storage budget:
//!
//! - Images already at or under the width bound pass through **unchanged** —
//!   no decode/re-encode round trip, so a second resize of the same payload
//!   is byte-identical to the first.
//! - Wider images are downscaled to the bound (aspect preserved, Lanczos3)
//!   and re-encoded as JPEG at a fixed lossy quality.
//!
//! Failures here never abort a publish: callers substitute a placeholder
//! token for the failing item and continue (see [`publish`](crate::publish)).
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image::load_from_memory` |
//! | Resize | `image::DynamicImage::resize` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//! | Data URI payload | `base64` (standard engine) |

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("failed to decode media: {0}")]
    Decode(String),
    #[error("failed to encode media: {0}")]
    Encode(String),
}

/// Quality setting for lossy JPEG re-encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(70)
    }
}

// ============================================================================
// Data URI codec
// ============================================================================

/// Wrap raw bytes as a base64 `data:` URI with the given MIME type.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Split a base64 `data:` URI into its MIME type and decoded payload.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), ResizeError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| ResizeError::Decode("not a data URI".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ResizeError::Decode("data URI has no payload".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| ResizeError::Decode("data URI is not base64-encoded".into()))?;
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| ResizeError::Decode(format!("invalid base64 payload: {e}")))?;
    Ok((mime.to_string(), bytes))
}

// ============================================================================
// Dimension math
// ============================================================================

/// Height of a downscaled image: `max_width * (h / w)`, rounded.
///
/// Only meaningful when `width > max_width`; smaller images pass through
/// without any resize.
pub fn scaled_height(width: u32, height: u32, max_width: u32) -> u32 {
    (max_width as f64 * height as f64 / width as f64).round() as u32
}

// ============================================================================
// Resizer
// ============================================================================

/// Downscales and re-encodes staged images. Pure and stateless: the same
/// input always yields the same output.
#[derive(Debug, Clone, Copy)]
pub struct MediaResizer {
    /// Maximum pixel width of the output. Wider sources are downscaled.
    pub max_width: u32,
    /// JPEG re-encoding quality for downscaled output.
    pub quality: Quality,
}

impl Default for MediaResizer {
    fn default() -> Self {
        Self {
            max_width: 800,
            quality: Quality::default(),
        }
    }
}

impl MediaResizer {
    pub fn new(max_width: u32, quality: Quality) -> Self {
        Self { max_width, quality }
    }

    /// Resize an image data URI down to `max_width`.
    ///
    /// Returns the input string unchanged when the image's native width is
    /// already within the bound. Otherwise decodes, downscales
    /// aspect-preserving, and re-encodes as a JPEG data URI at
    /// [`Quality`](Self::quality).
    pub fn resize_data_uri(&self, data_uri: &str) -> Result<String, ResizeError> {
        let (_mime, bytes) = decode_data_uri(data_uri)?;
        let img = image::load_from_memory(&bytes)
            .map_err(|e| ResizeError::Decode(e.to_string()))?;

        if img.width() <= self.max_width {
            return Ok(data_uri.to_string());
        }

        let new_height = scaled_height(img.width(), img.height(), self.max_width);
        let resized = img.resize_exact(self.max_width, new_height, FilterType::Lanczos3);

        let mut buf = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buf, self.quality.value());
        resized
            .write_with_encoder(encoder)
            .map_err(|e| ResizeError::Encode(e.to_string()))?;

        Ok(encode_data_uri("image/jpeg", &buf.into_inner()))
    }
}
