//! Per-pixel tone adjustments.
//!
//! Every function here returns a new buffer of the same size as its input and
//! clamps its parameter. The only error is a failed output allocation.

use super::ColorMatrix;
use crate::buffer::{rgba_from_argb, PixelBuffer, Rgba};
use crate::error::Result;
use crate::luminance::luma_u8;

/// Largest meaningful brightness delta.
pub const BRIGHTNESS_LIMIT: i32 = 255;

/// Add `value` to the red, green and blue channels.
///
/// `value` is clamped to `[-255, 255]`; each channel saturates at 0 and 255.
/// Alpha is unchanged.
pub fn brightness(src: &PixelBuffer, value: i32) -> Result<PixelBuffer> {
    let delta = value.clamp(-BRIGHTNESS_LIMIT, BRIGHTNESS_LIMIT);
    if delta != value {
        log::debug!("brightness {} clamped to {}", value, delta);
    }
    if delta == 0 {
        return Ok(src.clone());
    }
    let shift = |c: u8| (c as i32 + delta).clamp(0, 255) as u8;
    src.map_pixels(|[r, g, b, a]| [shift(r), shift(g), shift(b), a])
}

/// Push every pixel toward or away from its luma.
///
/// `level` is clamped to `[-100, 100]`; 0 leaves the image unchanged and
/// -100 yields grayscale.
pub fn saturation(src: &PixelBuffer, level: i32) -> Result<PixelBuffer> {
    if level == 0 {
        return Ok(src.clone());
    }
    ColorMatrix::saturation(level).apply(src)
}

/// Rotate hue by `degrees` (clamped to `[-180, 180]`).
pub fn hue(src: &PixelBuffer, degrees: i32) -> Result<PixelBuffer> {
    ColorMatrix::hue(degrees).apply(src)
}

/// Multiply every pixel by a shading color.
///
/// `color` is `0xAARRGGBB`. Each RGB channel is scaled by the matching shading
/// channel (`c * k / 255`), and the result is mixed with the original pixel
/// using the shading color's alpha as the ratio. Opaque white is the identity;
/// opaque black turns the image black. Alpha is unchanged.
pub fn shading(src: &PixelBuffer, color: u32) -> Result<PixelBuffer> {
    let [kr, kg, kb, ratio] = rgba_from_argb(color);
    let ratio = ratio as u32;
    let mix = |c: u8, k: u8| {
        let c = c as u32;
        let shaded = (c * k as u32 + 127) / 255;
        ((c * (255 - ratio) + shaded * ratio + 127) / 255) as u8
    };
    src.map_pixels(|[r, g, b, a]| [mix(r, kr), mix(g, kg), mix(b, kb), a])
}

/// Tint by rotating chroma `degree` degrees around the luma axis.
///
/// Works in a Y / R-Y / B-Y space with integer arithmetic. `degree` wraps
/// modulo 360. Alpha is unchanged.
pub fn tint(src: &PixelBuffer, degree: i32) -> Result<PixelBuffer> {
    let normalized = degree.rem_euclid(360);
    let angle = (normalized as f64).to_radians();
    let s = (256.0 * angle.sin()) as i32;
    let c = (256.0 * angle.cos()) as i32;
    src.map_pixels(|px| tint_pixel(px, s, c))
}

#[inline]
fn tint_pixel([r, g, b, a]: Rgba, s: i32, c: i32) -> Rgba {
    let (r, g, b) = (r as i32, g as i32, b as i32);

    let ry = (70 * r - 59 * g - 11 * b) / 100;
    let by = (-30 * r - 59 * g + 89 * b) / 100;
    let y = (30 * r + 59 * g + 11 * b) / 100;

    let ryy = (s * by + c * ry) / 256;
    let byy = (c * by - s * ry) / 256;
    let gyy = (-51 * ryy - 19 * byy) / 100;

    [
        (y + ryy).clamp(0, 255) as u8,
        (y + gyy).clamp(0, 255) as u8,
        (y + byy).clamp(0, 255) as u8,
        a,
    ]
}

/// Replace every pixel's RGB with its BT.709 luma. Alpha is preserved.
///
/// Idempotent: gray pixels map to themselves.
pub fn black_filter(src: &PixelBuffer) -> Result<PixelBuffer> {
    src.map_pixels(|px| {
        let y = luma_u8(px);
        [y, y, y, px[3]]
    })
}
