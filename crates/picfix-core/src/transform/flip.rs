//! Mirroring along the horizontal or vertical axis.

use serde::{Deserialize, Serialize};

use crate::buffer::{for_each_row, PixelBuffer, CHANNELS};
use crate::error::Result;

/// Axis to mirror across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipAxis {
    /// Left and right swap; rows keep their order.
    Horizontal,
    /// Top and bottom swap; each row is unchanged.
    Vertical,
}

impl FlipAxis {
    /// Map the widget's integer flip codes: `1` is vertical, anything else horizontal.
    pub fn from_code(code: i32) -> Self {
        if code == 1 {
            FlipAxis::Vertical
        } else {
            FlipAxis::Horizontal
        }
    }
}

/// Mirror `image` across `axis`. Dimensions are unchanged.
///
/// # Errors
///
/// `AllocationFailure` if the output can't be allocated.
pub fn flip(image: &PixelBuffer, axis: FlipAxis) -> Result<PixelBuffer> {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let stride = image.stride();
    let src = image.pixels();
    let mut out = image.plane_like(CHANNELS, 0u8)?;

    for_each_row(&mut out, stride, |y, row| match axis {
        FlipAxis::Horizontal => {
            let src_row = &src[y * stride..(y + 1) * stride];
            for (dst, px) in row
                .chunks_exact_mut(CHANNELS)
                .zip(src_row.chunks_exact(CHANNELS).rev())
            {
                dst.copy_from_slice(px);
            }
        }
        FlipAxis::Vertical => {
            let sy = h - 1 - y;
            row.copy_from_slice(&src[sy * stride..(sy + 1) * stride]);
        }
    });

    debug_assert_eq!(out.len(), w * h * CHANNELS);
    Ok(PixelBuffer::from_parts(image.width(), image.height(), out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::test_support::indexed;

    #[test]
    fn test_from_code() {
        assert_eq!(FlipAxis::from_code(1), FlipAxis::Vertical);
        assert_eq!(FlipAxis::from_code(0), FlipAxis::Horizontal);
        assert_eq!(FlipAxis::from_code(2), FlipAxis::Horizontal);
    }

    #[test]
    fn test_horizontal_flip_mirrors_columns() {
        let img = indexed(5, 3);
        let out = flip(&img, FlipAxis::Horizontal).unwrap();
        assert_eq!(out.dimensions(), (5, 3));
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(out.pixel(x, y), img.pixel(4 - x, y));
            }
        }
    }

    #[test]
    fn test_vertical_flip_mirrors_rows() {
        let img = indexed(4, 6);
        let out = flip(&img, FlipAxis::Vertical).unwrap();
        for y in 0..6 {
            assert_eq!(out.row(y), img.row(5 - y));
        }
    }

    #[test]
    fn test_single_pixel_unchanged() {
        let img = indexed(1, 1);
        assert_eq!(flip(&img, FlipAxis::Horizontal).unwrap(), img);
        assert_eq!(flip(&img, FlipAxis::Vertical).unwrap(), img);
    }
}
