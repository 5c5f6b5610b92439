//! Luma weighting using ITU-R BT.709 coefficients.
//!
//! Shared by the black filter, saturation, hue rotation and sketch edge
//! detection so that "gray" means the same thing everywhere.

use crate::buffer::Rgba;

/// ITU-R BT.709 coefficient for red channel in luminance calculation.
pub const LUMA_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luminance calculation.
pub const LUMA_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luminance calculation.
pub const LUMA_B: f32 = 0.0722;

/// Luma of normalized RGB values (0.0 to 1.0).
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Luma of an 8-bit pixel, rounded back to 0-255. Alpha is ignored.
///
/// For gray input (`r == g == b`) the result equals the input, which is what
/// makes the black filter idempotent.
#[inline]
pub fn luma_u8([r, g, b, _]: Rgba) -> u8 {
    luma(r as f32, g as f32, b as f32).clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMA_R + LUMA_G + LUMA_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma_u8([255, 255, 255, 0]), 255);
        assert_eq!(luma_u8([0, 0, 0, 255]), 0);
    }

    #[test]
    fn test_gray_is_fixed_point() {
        for v in 0..=255u8 {
            assert_eq!(luma_u8([v, v, v, 255]), v, "gray {} should map to itself", v);
        }
    }

    #[test]
    fn test_primaries() {
        // 0.2126 * 255 ≈ 54.21
        assert_eq!(luma_u8([255, 0, 0, 255]), 54);
        // 0.7152 * 255 ≈ 182.38
        assert_eq!(luma_u8([0, 255, 0, 255]), 182);
        // 0.0722 * 255 ≈ 18.41
        assert_eq!(luma_u8([0, 0, 255, 255]), 18);
    }

    #[test]
    fn test_normalized_matches_u8() {
        for r in [0u8, 64, 128, 192, 255] {
            for g in [0u8, 64, 128, 192, 255] {
                for b in [0u8, 64, 128, 192, 255] {
                    let f = luma(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
                    let expected = (f * 255.0).round() as i32;
                    let actual = luma_u8([r, g, b, 255]) as i32;
                    assert!((actual - expected).abs() <= 1, "({}, {}, {})", r, g, b);
                }
            }
        }
    }
}
