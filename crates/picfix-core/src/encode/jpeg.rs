//! JPEG encoding for export.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! JPEG has no alpha channel, so pixels are composited over black first.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::EncodeError;
use crate::buffer::{PixelBuffer, CHANNELS};

/// Quality used when exporting a framed photo.
pub const FRAME_EXPORT_QUALITY: u8 = 100;

/// Composite RGBA pixels over opaque black, returning packed RGB.
pub fn flatten_alpha(image: &PixelBuffer) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(image.pixel_count() * 3);
    for px in image.pixels().chunks_exact(CHANNELS) {
        let a = px[3] as u32;
        for &c in &px[..3] {
            rgb.push(((c as u32 * a + 127) / 255) as u8);
        }
    }
    rgb
}

/// Encode a buffer to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Source pixels; alpha is flattened over black
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 60-80: Medium quality, acceptable for sharing
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let quality = quality.clamp(1, 100);
    let rgb = flatten_alpha(image);

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(&rgb, image.width(), image.height(), ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::JpegFailed(e.to_string()))?;

    Ok(out)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::buffer::test_support::gradient;
    use proptest::prelude::*;

    proptest! {
        /// Property: any buffer and quality encodes to a well-formed JPEG.
        #[test]
        fn prop_valid_jpeg(w in 1u32..=40, h in 1u32..=40, quality in any::<u8>()) {
            let bytes = encode_jpeg(&gradient(w, h), quality).unwrap();
            prop_assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: Same input always produces same output (deterministic).
        #[test]
        fn prop_deterministic_output(w in 1u32..=20, h in 1u32..=20, quality in 1u8..=100) {
            let img = gradient(w, h);
            prop_assert_eq!(encode_jpeg(&img, quality).unwrap(), encode_jpeg(&img, quality).unwrap());
        }
    }
}
