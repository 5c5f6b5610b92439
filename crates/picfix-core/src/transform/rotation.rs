//! Image rotation with bilinear and Lanczos3 interpolation.
//!
//! Angles are in degrees and follow the Android canvas convention: positive
//! angles rotate clockwise on screen. The canvas grows to the bounding box of
//! the rotated image; area not covered by the source is transparent black.
//!
//! Multiples of 90° are handled as exact pixel permutations, so a quarter
//! turn never resamples.
//!
//! # Algorithm
//!
//! General angles use inverse mapping on pixel centers: for each output pixel
//! we find the source coordinate it came from and interpolate there.
//!
//! ```text
//! src_x = (dst_x - cx) * cos(-θ) - (dst_y - cy) * sin(-θ) + src_cx
//! src_y = (dst_x - cx) * sin(-θ) + (dst_y - cy) * cos(-θ) + src_cy
//! ```

use serde::{Deserialize, Serialize};

use crate::buffer::{for_each_row, PixelBuffer, Rgba, CHANNELS};
use crate::config::Limits;
use crate::error::Result;

/// Pixel written where the rotated source doesn't reach.
pub const ROTATION_BACKGROUND: Rgba = [0, 0, 0, 0];

/// Angles closer than this to a multiple of 90° snap to it.
const ANGLE_EPSILON: f64 = 0.001;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation - good for preview rendering.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation - good for export.
    Lanczos3,
}

/// Quarter turns an angle snaps to, if any.
fn quarter_turns(angle_degrees: f64) -> Option<u32> {
    let normalized = angle_degrees.rem_euclid(360.0);
    (0..=4u32)
        .find(|q| (normalized - *q as f64 * 90.0).abs() < ANGLE_EPSILON)
        .map(|q| q % 4)
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// Exact multiples of 90° return the original or swapped dimensions; other
/// angles return `round(|w cos| + |h sin|) x round(|w sin| + |h cos|)`,
/// never smaller than 1x1.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image around its center.
///
/// # Errors
///
/// `AllocationFailure` if the expanded canvas exceeds the default limits.
pub fn apply_rotation(
    image: &PixelBuffer,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> Result<PixelBuffer> {
    rotate_within(image, angle_degrees, filter, &Limits::default())
}

pub(crate) fn rotate_within(
    image: &PixelBuffer,
    angle_degrees: f64,
    filter: InterpolationFilter,
    limits: &Limits,
) -> Result<PixelBuffer> {
    if let Some(turns) = quarter_turns(angle_degrees) {
        return rotate_quarter_turns(image, turns, limits);
    }

    let (dst_w, dst_h) = compute_rotated_bounds(image.width(), image.height(), angle_degrees);
    let mut output = PixelBuffer::blank(dst_w, dst_h, limits)?.into_pixels();

    let angle_rad = -angle_degrees.to_radians();
    let (sin, cos) = angle_rad.sin_cos();

    let src_cx = image.width() as f64 / 2.0;
    let src_cy = image.height() as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    for_each_row(&mut output, dst_w as usize * CHANNELS, |dst_y, row| {
        for dst_x in 0..dst_w as usize {
            // Pixel centers, translated to the rotation origin
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx - 0.5;
            let src_y = dx * sin + dy * cos + src_cy - 0.5;

            let pixel = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y),
            };

            row[dst_x * CHANNELS..(dst_x + 1) * CHANNELS].copy_from_slice(&pixel);
        }
    });

    Ok(PixelBuffer::from_parts(dst_w, dst_h, output))
}

/// Exact rotation by `turns * 90°` clockwise.
pub(crate) fn rotate_quarter_turns(
    image: &PixelBuffer,
    turns: u32,
    limits: &Limits,
) -> Result<PixelBuffer> {
    let (w, h) = image.dimensions();
    let turns = turns % 4;
    if turns == 0 {
        return Ok(image.clone());
    }
    let (dst_w, dst_h) = if turns == 2 { (w, h) } else { (h, w) };
    let mut output = PixelBuffer::blank(dst_w, dst_h, limits)?.into_pixels();

    for_each_row(&mut output, dst_w as usize * CHANNELS, |y, row| {
        let y = y as u32;
        for x in 0..dst_w {
            let (sx, sy) = match turns {
                1 => (y, h - 1 - x),
                2 => (w - 1 - x, h - 1 - y),
                _ => (w - 1 - y, x),
            };
            let i = x as usize * CHANNELS;
            row[i..i + CHANNELS].copy_from_slice(&image.pixel(sx, sy));
        }
    });

    Ok(PixelBuffer::from_parts(dst_w, dst_h, output))
}

/// Whether a sample coordinate lies on the source image (pixel-center convention).
#[inline]
fn covers(image: &PixelBuffer, x: f64, y: f64) -> bool {
    x >= -0.5 && y >= -0.5 && x <= image.width() as f64 - 0.5 && y <= image.height() as f64 - 0.5
}

/// Sample a pixel using bilinear interpolation.
///
/// Neighbors past the edge are clamped, so the border keeps its color up to
/// the half-pixel boundary.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> Rgba {
    if !covers(image, x, y) {
        return ROTATION_BACKGROUND;
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = image.pixel_clamped(x0, y0);
    let p10 = image.pixel_clamped(x0 + 1, y0);
    let p01 = image.pixel_clamped(x0, y0 + 1);
    let p11 = image.pixel_clamped(x0 + 1, y0 + 1);

    let mut result = [0u8; CHANNELS];
    for i in 0..CHANNELS {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

/// Sample a pixel using Lanczos3 interpolation over a 6x6 neighborhood.
fn sample_lanczos3(image: &PixelBuffer, x: f64, y: f64) -> Rgba {
    if !covers(image, x, y) {
        return ROTATION_BACKGROUND;
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; CHANNELS];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);

            let pixel = image.pixel_clamped(px, py);
            for i in 0..CHANNELS {
                sum[i] += pixel[i] as f64 * weight;
            }
            weight_sum += weight;
        }
    }

    let mut result = [0u8; CHANNELS];
    if weight_sum > 0.0 {
        for i in 0..CHANNELS {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    result
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::test_support::{gradient, indexed};
    use crate::error::PicFixError;

    #[test]
    fn test_no_rotation_is_identity() {
        let img = gradient(100, 50);
        let result = apply_rotation(&img, 0.0, InterpolationFilter::Bilinear).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_tiny_rotation_snaps() {
        let img = gradient(10, 5);
        let result = apply_rotation(&img, 0.0001, InterpolationFilter::Bilinear).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_full_rotation_is_identity() {
        let img = gradient(17, 9);
        for angle in [360.0, -360.0, 720.0] {
            let result = apply_rotation(&img, angle, InterpolationFilter::Lanczos3).unwrap();
            assert_eq!(result, img);
        }
    }

    #[test]
    fn test_90_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, 270.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, -90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, 450.0), (50, 100));
    }

    #[test]
    fn test_180_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 180.0), (100, 50));
    }

    #[test]
    fn test_45_degree_rotation_bounds() {
        let (w, h) = compute_rotated_bounds(100, 100, 45.0);
        // Diagonal of 100x100 square is ~141.4
        assert_eq!((w, h), (141, 141));
    }

    #[test]
    fn test_opposite_rotations_same_bounds() {
        assert_eq!(
            compute_rotated_bounds(100, 80, 30.0),
            compute_rotated_bounds(100, 80, -30.0)
        );
    }

    #[test]
    fn test_bounds_never_zero() {
        for angle in [1.0, 15.0, 45.0, 89.0, 90.0, 135.0, 179.0, 180.0, 270.0, 359.0] {
            let (w, h) = compute_rotated_bounds(1, 1, angle);
            assert!(w > 0 && h > 0, "angle {}", angle);
        }
    }

    #[test]
    fn test_quarter_turn_clockwise() {
        // 2x1: [A B] rotated clockwise becomes a column [A; B]
        let img = indexed(2, 1);
        let a = img.pixel(0, 0);
        let b = img.pixel(1, 0);
        let result = apply_rotation(&img, 90.0, InterpolationFilter::Bilinear).unwrap();
        assert_eq!(result.dimensions(), (1, 2));
        assert_eq!(result.pixel(0, 0), a);
        assert_eq!(result.pixel(0, 1), b);
    }

    #[test]
    fn test_quarter_turn_counter_clockwise() {
        let img = indexed(2, 1);
        let result = apply_rotation(&img, -90.0, InterpolationFilter::Bilinear).unwrap();
        assert_eq!(result.dimensions(), (1, 2));
        assert_eq!(result.pixel(0, 0), img.pixel(1, 0));
        assert_eq!(result.pixel(0, 1), img.pixel(0, 0));
    }

    #[test]
    fn test_four_quarter_turns_round_trip() {
        let img = indexed(7, 4);
        let mut current = img.clone();
        for _ in 0..4 {
            current = apply_rotation(&current, 90.0, InterpolationFilter::Bilinear).unwrap();
        }
        assert_eq!(current, img);
    }

    #[test]
    fn test_180_reverses_pixels() {
        let img = indexed(5, 3);
        let result = apply_rotation(&img, 180.0, InterpolationFilter::Bilinear).unwrap();
        assert_eq!(result.pixel(0, 0), img.pixel(4, 2));
        assert_eq!(result.pixel(4, 2), img.pixel(0, 0));
    }

    #[test]
    fn test_rotation_expands_canvas_with_transparent_corners() {
        let img = PixelBuffer::filled(40, 40, [200, 100, 50, 255]).unwrap();
        let result = apply_rotation(&img, 45.0, InterpolationFilter::Bilinear).unwrap();

        assert!(result.width() > img.width());
        assert!(result.height() > img.height());
        assert_eq!(result.pixel(0, 0), ROTATION_BACKGROUND);
        let (cx, cy) = (result.width() / 2, result.height() / 2);
        assert_eq!(result.pixel(cx, cy), [200, 100, 50, 255]);
    }

    #[test]
    fn test_bilinear_vs_lanczos_same_bounds() {
        let img = gradient(50, 50);
        let bilinear = apply_rotation(&img, 15.0, InterpolationFilter::Bilinear).unwrap();
        let lanczos = apply_rotation(&img, 15.0, InterpolationFilter::Lanczos3).unwrap();
        assert_eq!(bilinear.dimensions(), lanczos.dimensions());
    }

    #[test]
    fn test_small_images_do_not_panic() {
        for (w, h) in [(1, 1), (4, 4), (100, 1), (1, 100)] {
            let img = gradient(w, h);
            for filter in [InterpolationFilter::Bilinear, InterpolationFilter::Lanczos3] {
                let result = apply_rotation(&img, 30.0, filter).unwrap();
                assert!(result.width() > 0 && result.height() > 0);
            }
        }
    }

    #[test]
    fn test_rotation_respects_limits() {
        let img = gradient(100, 100);
        let limits = Limits { max_pixels: 12_000 };
        let result = rotate_within(&img, 45.0, InterpolationFilter::Bilinear, &limits);
        assert!(matches!(result, Err(PicFixError::AllocationFailure { .. })));
    }

    #[test]
    fn test_lanczos_weight_at_zero() {
        assert!((lanczos_weight(0.0, 3.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lanczos_weight_at_boundary() {
        assert!(lanczos_weight(3.0, 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lanczos_weight_symmetry() {
        assert!((lanczos_weight(1.5, 3.0) - lanczos_weight(-1.5, 3.0)).abs() < 1e-10);
    }
}
