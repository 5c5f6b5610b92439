//! Rectangular cropping in pixel coordinates.
//!
//! # Coordinate System
//!
//! - `(0, 0)` is the top-left pixel
//! - `x + width` and `y + height` may equal the source extent but not exceed it
//!
//! Unlike rotation, a crop never guesses: a region that doesn't fit is an
//! error rather than being clamped to the buffer.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::config::Limits;
use crate::error::{PicFixError, Result};

/// Extract the `width x height` region whose top-left corner is `(x, y)`.
///
/// # Errors
///
/// - `InvalidDimensions` if `width` or `height` is zero
/// - `OutOfBounds` if the region extends past the source
///
/// # Example
///
/// ```ignore
/// let img = PixelBuffer::filled(100, 100, [128, 128, 128, 255])?;
/// let cropped = crop(&img, 25, 25, 50, 50)?;
/// assert_eq!(cropped.dimensions(), (50, 50));
/// ```
pub fn crop(image: &PixelBuffer, x: u32, y: u32, width: u32, height: u32) -> Result<PixelBuffer> {
    crop_within(image, x, y, width, height, &Limits::default())
}

pub(crate) fn crop_within(
    image: &PixelBuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    limits: &Limits,
) -> Result<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(PicFixError::InvalidDimensions { width, height });
    }

    let fits_x = x.checked_add(width).is_some_and(|right| right <= image.width());
    let fits_y = y.checked_add(height).is_some_and(|bottom| bottom <= image.height());
    if !fits_x || !fits_y {
        return Err(PicFixError::out_of_bounds(
            (x, y, width, height),
            image.dimensions(),
        ));
    }

    if (x, y) == (0, 0) && (width, height) == image.dimensions() {
        return Ok(image.clone());
    }

    let mut pixels = PixelBuffer::blank(width, height, limits)?.into_pixels();
    let start = x as usize * CHANNELS;
    let end = start + width as usize * CHANNELS;
    for (dst, src_y) in pixels.chunks_exact_mut(end - start).zip(y..y + height) {
        dst.copy_from_slice(&image.row(src_y)[start..end]);
    }

    Ok(PixelBuffer::from_parts(width, height, pixels))
}
