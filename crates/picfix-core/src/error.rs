//! Error type shared by every transform in the pipeline.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PicFixError>;

/// Errors returned by pixel transforms.
///
/// Tone parameters (blur radius, brightness delta, saturation level, ...) are
/// clamped and never produce an error. Structural parameters (rectangles,
/// indices, output sizes) fail instead.
#[derive(Debug, Error)]
pub enum PicFixError {
    /// A rectangle or point extends past the buffer extents.
    #[error(
        "Region {width}x{height} at ({x}, {y}) is outside the {bounds_width}x{bounds_height} buffer"
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        bounds_width: u32,
        bounds_height: u32,
    },

    /// A catalog index is not in `[0, len)`.
    #[error("Index {index} out of range for catalog of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// The requested output would exceed the configured memory bound.
    #[error("Cannot allocate {width}x{height} buffer: limit is {limit} pixels")]
    AllocationFailure { width: u32, height: u32, limit: u64 },

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The facade was asked for an operation whose collaborator isn't configured.
    #[error("No {0} configured for this pipeline")]
    MissingCollaborator(&'static str),

    /// A decode collaborator failed; propagated unchanged.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The encode collaborator failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl PicFixError {
    /// Build an [`PicFixError::OutOfBounds`] for a rectangle checked against a buffer.
    pub(crate) fn out_of_bounds(
        (x, y, width, height): (u32, u32, u32, u32),
        (bounds_width, bounds_height): (u32, u32),
    ) -> Self {
        PicFixError::OutOfBounds {
            x,
            y,
            width,
            height,
            bounds_width,
            bounds_height,
        }
    }
}
