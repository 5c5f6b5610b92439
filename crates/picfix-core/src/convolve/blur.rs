//! Separable Gaussian blur.
//!
//! The blur runs as two 1-D passes (horizontal then vertical) over an `f32`
//! intermediate, each pass parallel by row. Out-of-range taps are clamped to
//! the nearest edge pixel of the full source, so splitting work by row never
//! changes the result.

use crate::buffer::{for_each_row, PixelBuffer, CHANNELS};
use crate::error::Result;

/// Smallest accepted blur radius.
pub const MIN_BLUR_RADIUS: f32 = 1.0;

/// Largest accepted blur radius.
pub const MAX_BLUR_RADIUS: f32 = 25.0;

/// Clamp a requested radius into `[1, 25]`. NaN becomes 1.
pub fn clamp_radius(radius: f32) -> f32 {
    if radius.is_nan() {
        return MIN_BLUR_RADIUS;
    }
    radius.clamp(MIN_BLUR_RADIUS, MAX_BLUR_RADIUS)
}

/// Build a normalized 1-D Gaussian kernel for `radius`.
///
/// Half-width is `ceil(radius)`; sigma is `0.4 * radius + 0.6`.
fn build_kernel(radius: f32) -> Vec<f32> {
    let half = radius.ceil() as usize;
    let sigma = 0.4 * radius + 0.6;
    let s2 = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..=half * 2)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / s2).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

/// Blur every channel (including alpha) with a Gaussian of the given radius.
///
/// `radius` is clamped to `[1, 25]`. Output dimensions equal the input's.
///
/// # Errors
///
/// `AllocationFailure` if the `f32` intermediate or the output can't be
/// allocated.
pub fn blur(src: &PixelBuffer, radius: f32) -> Result<PixelBuffer> {
    let radius_clamped = clamp_radius(radius);
    if radius_clamped != radius {
        log::debug!("blur radius {} clamped to {}", radius, radius_clamped);
    }

    let kernel = build_kernel(radius_clamped);
    let half = (kernel.len() / 2) as i64;
    let (w, h) = (src.width() as usize, src.height() as usize);
    let stride = w * CHANNELS;
    let src_raw = src.pixels();

    // Horizontal pass
    let mut horizontal = src.plane_like(CHANNELS, 0.0f32)?;
    for_each_row(&mut horizontal, stride, |y, row_out| {
        let row_in = &src_raw[y * stride..(y + 1) * stride];
        for x in 0..w {
            let mut acc = [0.0f32; CHANNELS];
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = (x as i64 + ki as i64 - half).clamp(0, w as i64 - 1) as usize;
                let idx = sx * CHANNELS;
                for c in 0..CHANNELS {
                    acc[c] += row_in[idx + c] as f32 * kv;
                }
            }
            row_out[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&acc);
        }
    });

    // Vertical pass
    let mut out = src.plane_like(CHANNELS, 0u8)?;
    for_each_row(&mut out, stride, |y, row_out| {
        for x in 0..w {
            let mut acc = [0.0f32; CHANNELS];
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = (y as i64 + ki as i64 - half).clamp(0, h as i64 - 1) as usize;
                let idx = sy * stride + x * CHANNELS;
                for c in 0..CHANNELS {
                    acc[c] += horizontal[idx + c] * kv;
                }
            }
            for c in 0..CHANNELS {
                row_out[x * CHANNELS + c] = acc[c].round().clamp(0.0, 255.0) as u8;
            }
        }
    });

    Ok(PixelBuffer::from_parts(src.width(), src.height(), out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::test_support::gradient;

    #[test]
    fn test_clamp_radius() {
        assert_eq!(clamp_radius(0.2), 1.0);
        assert_eq!(clamp_radius(-3.0), 1.0);
        assert_eq!(clamp_radius(f32::NAN), 1.0);
        assert_eq!(clamp_radius(7.5), 7.5);
        assert_eq!(clamp_radius(100.0), 25.0);
    }

    #[test]
    fn test_kernel_normalized_and_symmetric() {
        for radius in [1.0, 2.5, 10.0, 25.0] {
            let k = build_kernel(radius);
            let sum: f32 = k.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            for i in 0..k.len() / 2 {
                assert!((k[i] - k[k.len() - 1 - i]).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn test_kernel_size_from_radius() {
        assert_eq!(build_kernel(1.0).len(), 3);
        assert_eq!(build_kernel(2.5).len(), 7);
        assert_eq!(build_kernel(25.0).len(), 51);
    }

    #[test]
    fn test_uniform_buffer_unchanged() {
        let img = PixelBuffer::filled(20, 15, [90, 180, 33, 200]).unwrap();
        for radius in [1.0, 3.3, 25.0] {
            assert_eq!(blur(&img, radius).unwrap(), img);
        }
    }

    #[test]
    fn test_small_radius_clamped_to_one() {
        let img = gradient(16, 16);
        assert_eq!(blur(&img, 0.0).unwrap(), blur(&img, 1.0).unwrap());
    }

    #[test]
    fn test_blur_smooths_edge() {
        // Left half black, right half white
        let mut pixels = Vec::new();
        for _y in 0..8 {
            for x in 0..8 {
                let v = if x < 4 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let img = PixelBuffer::new(8, 8, pixels).unwrap();
        let out = blur(&img, 2.0).unwrap();

        let left = out.pixel(3, 4)[0];
        let right = out.pixel(4, 4)[0];
        assert!(left > 0 && left < 128, "left of edge: {}", left);
        assert!(right > 128 && right < 255, "right of edge: {}", right);
        // Far edges stay close to their original value
        assert!(out.pixel(0, 4)[0] < 40);
        assert!(out.pixel(7, 4)[0] > 215);
    }

    #[test]
    fn test_blur_deterministic() {
        let img = gradient(33, 21);
        assert_eq!(blur(&img, 4.0).unwrap(), blur(&img, 4.0).unwrap());
    }

    #[test]
    fn test_single_pixel() {
        let img = PixelBuffer::filled(1, 1, [10, 20, 30, 40]).unwrap();
        assert_eq!(blur(&img, 5.0).unwrap(), img);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: blurring a constant field is a no-op.
        #[test]
        fn prop_uniform_fixed_point(
            w in 1u32..=24,
            h in 1u32..=24,
            color in any::<[u8; 4]>(),
            radius in 0.0f32..30.0,
        ) {
            let img = PixelBuffer::filled(w, h, color).unwrap();
            prop_assert_eq!(blur(&img, radius).unwrap(), img);
        }

        /// Property: output stays within the source's per-channel range.
        #[test]
        fn prop_output_within_source_range(
            pixels in proptest::collection::vec(any::<u8>(), 10 * 7 * 4),
            radius in 1.0f32..8.0,
        ) {
            let img = PixelBuffer::new(10, 7, pixels).unwrap();
            let out = blur(&img, radius).unwrap();
            for c in 0..4 {
                let min = img.iter_pixels().map(|p| p[c]).min().unwrap();
                let max = img.iter_pixels().map(|p| p[c]).max().unwrap();
                for p in out.iter_pixels() {
                    prop_assert!(p[c] >= min && p[c] <= max);
                }
            }
        }
    }
}
