//! Shared test utilities for the albumoto test suite.
//!
//! Provides synthetic media generators — real JPEG payloads at arbitrary
//! dimensions, plus ingestion-boundary fixtures — so pipeline tests exercise
//! the actual decode/resize/encode path instead of stub bytes.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut staging = StagingStore::new();
//! staging.add(vec![ingest_jpeg("a.jpg", 1600, 1200)]).unwrap();
//! let uri = jpeg_data_uri(400, 300);
//! ```

use crate::resize::encode_data_uri;
use crate::staging::IngestFile;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage};
use std::io::Cursor;

// =========================================================================
// Synthetic media
// =========================================================================

/// Encode a synthetic gradient image as JPEG bytes at the given dimensions.
///
/// The gradient gives the encoder non-trivial content, so downscaled output
/// has realistic sizes.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, 85);
    DynamicImage::ImageRgb8(img)
        .write_with_encoder(encoder)
        .unwrap();
    buf.into_inner()
}

/// A real JPEG at the given dimensions, wrapped as a base64 data URI.
pub fn jpeg_data_uri(width: u32, height: u32) -> String {
    encode_data_uri("image/jpeg", &jpeg_bytes(width, height))
}

// =========================================================================
// Ingestion fixtures
// =========================================================================

/// An ingestable JPEG file with real, decodable image bytes.
pub fn ingest_jpeg(name: &str, width: u32, height: u32) -> IngestFile {
    IngestFile {
        name: name.to_string(),
        mime: "image/jpeg".to_string(),
        bytes: jpeg_bytes(width, height),
    }
}

/// An ingestable video file. The bytes are opaque — video content is never
/// decoded or embedded, so a stub payload is enough.
pub fn ingest_video(name: &str) -> IngestFile {
    IngestFile {
        name: name.to_string(),
        mime: "video/mp4".to_string(),
        bytes: vec![0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p'],
    }
}
