//! EXIF orientation correction.
//!
//! Cameras store pixels in sensor order and record how the image should be
//! displayed in the EXIF orientation tag. Each of the eight values is an exact
//! quarter-turn optionally followed by a mirror, so correction never resamples.

use serde::{Deserialize, Serialize};

use super::flip::{flip, FlipAxis};
use super::rotation::rotate_quarter_turns;
use crate::buffer::PixelBuffer;
use crate::config::Limits;
use crate::error::Result;

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Mirror across the main diagonal.
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Mirror across the anti-diagonal.
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// Clockwise quarter turns, then the mirror applied to the turned image.
    fn steps(self) -> (u32, Option<FlipAxis>) {
        match self {
            Orientation::Normal => (0, None),
            Orientation::FlipHorizontal => (0, Some(FlipAxis::Horizontal)),
            Orientation::Rotate180 => (2, None),
            Orientation::FlipVertical => (0, Some(FlipAxis::Vertical)),
            Orientation::Transpose => (1, Some(FlipAxis::Horizontal)),
            Orientation::Rotate90CW => (1, None),
            Orientation::Transverse => (1, Some(FlipAxis::Vertical)),
            Orientation::Rotate270CW => (3, None),
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Rotate and mirror `image` so it displays upright.
pub fn apply_orientation(image: &PixelBuffer, orientation: Orientation) -> Result<PixelBuffer> {
    orient_within(image, orientation, &Limits::default())
}

pub(crate) fn orient_within(
    image: &PixelBuffer,
    orientation: Orientation,
    limits: &Limits,
) -> Result<PixelBuffer> {
    let (turns, mirror) = orientation.steps();
    let turned = rotate_quarter_turns(image, turns, limits)?;
    match mirror {
        Some(axis) => flip(&turned, axis),
        None => Ok(turned),
    }
}
