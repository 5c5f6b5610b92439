//! 4x5 affine color matrices.
//!
//! The layout follows the Android `ColorMatrix` convention so descriptors can
//! be handed straight to a display surface:
//!
//! ```text
//! R' = m[0]*R  + m[1]*G  + m[2]*B  + m[3]*A  + m[4]
//! G' = m[5]*R  + m[6]*G  + m[7]*B  + m[8]*A  + m[9]
//! B' = m[10]*R + m[11]*G + m[12]*B + m[13]*A + m[14]
//! A' = m[15]*R + m[16]*G + m[17]*B + m[18]*A + m[19]
//! ```
//!
//! Channels are in 0-255 and offsets (`m[4]`, `m[9]`, ...) are in the same scale.

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, Rgba};
use crate::error::Result;
use crate::luminance::{LUMA_B, LUMA_G, LUMA_R};

/// Hue rotation range accepted by [`ColorMatrix::hue`], in degrees.
pub const HUE_LIMIT: i32 = 180;

/// Saturation level range accepted by [`ColorMatrix::saturation`].
pub const SATURATION_LIMIT: i32 = 100;

/// A reusable per-pixel color transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorMatrix {
    m: [f32; 20],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorMatrix {
    /// The matrix that leaves every pixel unchanged.
    pub const fn identity() -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
        }
    }

    /// Build from raw row-major values.
    pub const fn from_array(m: [f32; 20]) -> Self {
        Self { m }
    }

    /// Row-major values, suitable for a display collaborator.
    pub fn as_array(&self) -> &[f32; 20] {
        &self.m
    }

    /// Hue rotation by `degrees`, clamped to `[-180, 180]`.
    ///
    /// Rotation happens around the luma axis, so grays stay gray.
    pub fn hue(degrees: i32) -> Self {
        let clamped = degrees.clamp(-HUE_LIMIT, HUE_LIMIT);
        if clamped != degrees {
            log::debug!("hue {} clamped to {}", degrees, clamped);
        }
        if clamped == 0 {
            return Self::identity();
        }

        let theta = (clamped as f32).to_radians();
        let (sin, cos) = theta.sin_cos();
        let (lr, lg, lb) = (0.213f32, 0.715f32, 0.072f32);

        Self {
            m: [
                lr + cos * (1.0 - lr) + sin * -lr,
                lg + cos * -lg + sin * -lg,
                lb + cos * -lb + sin * (1.0 - lb),
                0.0,
                0.0,
                lr + cos * -lr + sin * 0.143,
                lg + cos * (1.0 - lg) + sin * 0.140,
                lb + cos * -lb + sin * -0.283,
                0.0,
                0.0,
                lr + cos * -lr + sin * -(1.0 - lr),
                lg + cos * -lg + sin * lg,
                lb + cos * (1.0 - lb) + sin * lb,
                0.0,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0,
                0.0,
            ],
        }
    }

    /// Saturation matrix for `level` in `[-100, 100]` (clamped).
    ///
    /// 0 is neutral, -100 is fully desaturated and 100 doubles the distance of
    /// every channel from the pixel's luma.
    pub fn saturation(level: i32) -> Self {
        let clamped = level.clamp(-SATURATION_LIMIT, SATURATION_LIMIT);
        if clamped != level {
            log::debug!("saturation {} clamped to {}", level, clamped);
        }
        let s = 1.0 + clamped as f32 / SATURATION_LIMIT as f32;
        let inv = 1.0 - s;
        let (r, g, b) = (LUMA_R * inv, LUMA_G * inv, LUMA_B * inv);

        Self {
            m: [
                r + s, g, b, 0.0, 0.0, //
                r, g + s, b, 0.0, 0.0, //
                r, g, b + s, 0.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
        }
    }

    /// Compose two matrices: the result applies `self` first, then `next`.
    pub fn then(&self, next: &ColorMatrix) -> ColorMatrix {
        let a = &next.m;
        let b = &self.m;
        let mut out = [0.0f32; 20];
        for row in 0..4 {
            for col in 0..5 {
                let mut v = 0.0;
                for k in 0..4 {
                    v += a[row * 5 + k] * b[k * 5 + col];
                }
                if col == 4 {
                    v += a[row * 5 + 4];
                }
                out[row * 5 + col] = v;
            }
        }
        ColorMatrix { m: out }
    }

    /// Transform a single pixel. Output channels are clamped to 0-255.
    #[inline]
    pub fn apply_to_pixel(&self, [r, g, b, a]: Rgba) -> Rgba {
        let (r, g, b, a) = (r as f32, g as f32, b as f32, a as f32);
        let m = &self.m;
        let channel = |row: usize| {
            let i = row * 5;
            (m[i] * r + m[i + 1] * g + m[i + 2] * b + m[i + 3] * a + m[i + 4])
                .clamp(0.0, 255.0)
                .round() as u8
        };
        [channel(0), channel(1), channel(2), channel(3)]
    }

    /// Transform every pixel of a buffer.
    pub fn apply(&self, src: &PixelBuffer) -> Result<PixelBuffer> {
        src.map_pixels(|px| self.apply_to_pixel(px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::test_support::gradient;

    #[test]
    fn test_identity_is_noop() {
        let img = gradient(16, 9);
        assert_eq!(ColorMatrix::identity().apply(&img).unwrap(), img);
    }

    #[test]
    fn test_hue_zero_is_identity() {
        assert_eq!(ColorMatrix::hue(0), ColorMatrix::identity());
    }

    #[test]
    fn test_hue_clamps_level() {
        assert_eq!(ColorMatrix::hue(500), ColorMatrix::hue(180));
        assert_eq!(ColorMatrix::hue(-500), ColorMatrix::hue(-180));
    }

    #[test]
    fn test_hue_keeps_grays() {
        let m = ColorMatrix::hue(90);
        for v in [0u8, 50, 128, 200, 255] {
            let out = m.apply_to_pixel([v, v, v, 200]);
            for c in &out[..3] {
                assert!((*c as i32 - v as i32).abs() <= 1, "gray {} -> {:?}", v, out);
            }
            assert_eq!(out[3], 200);
        }
    }

    #[test]
    fn test_hue_rotates_red() {
        let out = ColorMatrix::hue(120).apply_to_pixel([255, 0, 0, 255]);
        // Red rotated by 120 degrees moves toward green
        assert!(out[1] > out[0], "{:?}", out);
    }

    #[test]
    fn test_saturation_neutral() {
        let img = gradient(12, 12);
        assert_eq!(ColorMatrix::saturation(0).apply(&img).unwrap(), img);
    }

    #[test]
    fn test_saturation_minimum_is_gray() {
        let out = ColorMatrix::saturation(-100).apply_to_pixel([200, 40, 90, 255]);
        assert!((out[0] as i32 - out[1] as i32).abs() <= 1);
        assert!((out[1] as i32 - out[2] as i32).abs() <= 1);
    }

    #[test]
    fn test_saturation_monotonic() {
        let px = [180, 90, 60, 255];
        let mut prev_spread = -1i32;
        for level in (-100..=100).step_by(20) {
            let [r, g, b, _] = ColorMatrix::saturation(level).apply_to_pixel(px);
            let spread = r.max(g).max(b) as i32 - r.min(g).min(b) as i32;
            assert!(spread >= prev_spread, "level {} spread {}", level, spread);
            prev_spread = spread;
        }
    }

    #[test]
    fn test_then_composes_in_order() {
        let a = ColorMatrix::saturation(-100);
        let b = ColorMatrix::hue(45);
        let px = [30, 160, 220, 255];
        let composed = a.then(&b).apply_to_pixel(px);
        let sequential = b.apply_to_pixel(a.apply_to_pixel(px));
        for i in 0..4 {
            assert!((composed[i] as i32 - sequential[i] as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_then_identity() {
        let m = ColorMatrix::hue(33);
        let composed = m.then(&ColorMatrix::identity());
        for (x, y) in composed.as_array().iter().zip(m.as_array()) {
            assert!((x - y).abs() < 1e-6);
        }
    }
}
