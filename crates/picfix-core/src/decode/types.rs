//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::Orientation;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is not a recognized image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image is larger than the configured pixel limit.
    #[error("Decoded image {width}x{height} exceeds the pixel limit")]
    TooLarge { width: u32, height: u32 },

    /// Font bytes couldn't be parsed.
    #[error("Invalid font data: {0}")]
    InvalidFont(String),

    /// A catalog resource could not be produced.
    #[error("Resource unavailable: {0}")]
    Unavailable(String),
}

/// Header facts read without decoding pixel data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Stored width in pixels (before orientation correction).
    pub width: u32,
    /// Stored height in pixels (before orientation correction).
    pub height: u32,
    /// EXIF orientation.
    pub orientation: Orientation,
}

impl ImageInfo {
    /// Get the effective dimensions after orientation correction.
    pub fn oriented_dimensions(&self) -> (u32, u32) {
        if self.orientation.swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oriented_dimensions() {
        let mut info = ImageInfo {
            width: 6000,
            height: 4000,
            orientation: Orientation::Normal,
        };
        assert_eq!(info.oriented_dimensions(), (6000, 4000));

        info.orientation = Orientation::Rotate90CW;
        assert_eq!(info.oriented_dimensions(), (4000, 6000));
    }

    #[test]
    fn test_decode_error_display() {
        assert_eq!(
            DecodeError::InvalidFormat.to_string(),
            "Invalid or unsupported image format"
        );
        assert_eq!(
            DecodeError::TooLarge {
                width: 20000,
                height: 20000
            }
            .to_string(),
            "Decoded image 20000x20000 exceeds the pixel limit"
        );
    }
}
