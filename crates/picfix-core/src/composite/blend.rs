//! Source-over alpha compositing.
//!
//! With `a = overlay.a / 255`:
//!
//! ```text
//! out.rgb = overlay.rgb * a + base.rgb * (1 - a)
//! out.a   = overlay.a + base.a * (1 - a)
//! ```
//!
//! evaluated in integer arithmetic with round-half-up.

use serde::{Deserialize, Serialize};

use crate::buffer::{for_each_row, PixelBuffer, Rgba, CHANNELS};
use crate::config::Limits;
use crate::error::{PicFixError, Result};
use crate::transform::{resize_within, FilterType};

/// Top-left corner of an overlay on its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
}

impl Placement {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Composite one overlay pixel onto one base pixel.
#[inline]
pub fn blend_pixel(base: Rgba, over: Rgba) -> Rgba {
    let a = over[3] as u32;
    let inv = 255 - a;
    let mix = |o: u8, b: u8| ((o as u32 * a + b as u32 * inv + 127) / 255) as u8;
    [
        mix(over[0], base[0]),
        mix(over[1], base[1]),
        mix(over[2], base[2]),
        (a + (base[3] as u32 * inv + 127) / 255) as u8,
    ]
}

/// Alpha-blend `overlay` onto `base` with its top-left corner at `placement`.
///
/// Pixels outside the overlay rectangle are copied from `base`.
///
/// # Errors
///
/// `OutOfBounds` if the overlay rectangle doesn't lie entirely inside `base`.
pub fn overlay(base: &PixelBuffer, overlay: &PixelBuffer, placement: Placement) -> Result<PixelBuffer> {
    let (ow, oh) = overlay.dimensions();
    let fits_x = placement
        .x
        .checked_add(ow)
        .is_some_and(|right| right <= base.width());
    let fits_y = placement
        .y
        .checked_add(oh)
        .is_some_and(|bottom| bottom <= base.height());
    if !fits_x || !fits_y {
        return Err(PicFixError::out_of_bounds(
            (placement.x, placement.y, ow, oh),
            base.dimensions(),
        ));
    }

    let stride = base.stride();
    let (px, py) = (placement.x as usize, placement.y as usize);
    let mut out = base.try_clone_pixels()?;

    for_each_row(&mut out, stride, |y, row| {
        if y < py || y >= py + oh as usize {
            return;
        }
        let over_row = overlay.row((y - py) as u32);
        let dst = &mut row[px * CHANNELS..(px + ow as usize) * CHANNELS];
        for (d, o) in dst
            .chunks_exact_mut(CHANNELS)
            .zip(over_row.chunks_exact(CHANNELS))
        {
            let blended = blend_pixel([d[0], d[1], d[2], d[3]], [o[0], o[1], o[2], o[3]]);
            d.copy_from_slice(&blended);
        }
    });

    Ok(PixelBuffer::from_parts(base.width(), base.height(), out))
}

/// Stretch `overlay` (bilinear) to the base's dimensions and blend it at the origin.
pub fn overlay_full_frame(base: &PixelBuffer, overlay_layer: &PixelBuffer) -> Result<PixelBuffer> {
    overlay_full_frame_within(base, overlay_layer, &Limits::default())
}

pub(crate) fn overlay_full_frame_within(
    base: &PixelBuffer,
    overlay_layer: &PixelBuffer,
    limits: &Limits,
) -> Result<PixelBuffer> {
    let (w, h) = base.dimensions();
    if overlay_layer.dimensions() != (w, h) {
        log::debug!(
            "scaling {}x{} overlay to {}x{}",
            overlay_layer.width(),
            overlay_layer.height(),
            w,
            h
        );
    }
    let scaled = resize_within(overlay_layer, w, h, FilterType::Bilinear, limits)?;
    overlay(base, &scaled, Placement::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::test_support::{gradient, indexed};

    #[test]
    fn test_blend_pixel_extremes() {
        let base = [10, 20, 30, 255];
        assert_eq!(blend_pixel(base, [200, 100, 50, 0]), base);
        assert_eq!(blend_pixel(base, [200, 100, 50, 255]), [200, 100, 50, 255]);
    }

    #[test]
    fn test_blend_pixel_half() {
        // 200*128 + 0*127 = 25600 -> (25600 + 127) / 255 = 100
        assert_eq!(blend_pixel([0, 0, 0, 255], [200, 200, 200, 128]), [100, 100, 100, 255]);
    }

    #[test]
    fn test_blend_over_transparent_base() {
        assert_eq!(blend_pixel([0, 0, 0, 0], [90, 90, 90, 77]), [27, 27, 27, 77]);
    }

    #[test]
    fn test_transparent_overlay_is_identity() {
        let base = gradient(20, 10);
        let clear = PixelBuffer::transparent(8, 4).unwrap();
        assert_eq!(overlay(&base, &clear, Placement::new(3, 2)).unwrap(), base);
    }

    #[test]
    fn test_opaque_overlay_replaces_region_only() {
        let base = indexed(10, 10);
        let patch = PixelBuffer::filled(3, 2, [1, 2, 3, 255]).unwrap();
        let out = overlay(&base, &patch, Placement::new(7, 8)).unwrap();

        for y in 0..10 {
            for x in 0..10 {
                let inside = (7..10).contains(&x) && (8..10).contains(&y);
                let expected = if inside { [1, 2, 3, 255] } else { base.pixel(x, y) };
                assert_eq!(out.pixel(x, y), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_overlay_outside_base_fails() {
        let base = indexed(10, 10);
        let patch = PixelBuffer::filled(3, 3, [0, 0, 0, 255]).unwrap();
        assert!(matches!(
            overlay(&base, &patch, Placement::new(8, 0)),
            Err(PicFixError::OutOfBounds { .. })
        ));
        assert!(matches!(
            overlay(&base, &patch, Placement::new(0, u32::MAX)),
            Err(PicFixError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_full_frame_scales_overlay() {
        let base = PixelBuffer::filled(40, 30, [0, 0, 0, 255]).unwrap();
        let layer = PixelBuffer::filled(4, 3, [255, 255, 255, 255]).unwrap();
        let out = overlay_full_frame(&base, &layer).unwrap();
        assert_eq!(out.dimensions(), (40, 30));
        assert!(out.iter_pixels().all(|p| p == [255, 255, 255, 255]));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a fully transparent overlay never changes the base.
        #[test]
        fn prop_transparent_pixel_identity(base in any::<[u8; 4]>(), rgb in any::<[u8; 3]>()) {
            prop_assert_eq!(blend_pixel(base, [rgb[0], rgb[1], rgb[2], 0]), base);
        }

        /// Property: output alpha never drops below either input's alpha.
        #[test]
        fn prop_alpha_monotone(base in any::<[u8; 4]>(), over in any::<[u8; 4]>()) {
            let out = blend_pixel(base, over);
            prop_assert!(out[3] >= over[3]);
            prop_assert!(out[3] >= base[3]);
        }
    }
}
