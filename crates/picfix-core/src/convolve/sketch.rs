//! Sketch stylization from a Sobel edge map.
//!
//! The luma plane of the whole source is computed first, then each output row
//! reads the 3x3 neighborhood of every pixel from that plane with
//! clamp-to-edge addressing. Edge magnitude is `sqrt(gx² + gy²) / 4`, capped
//! at 255, and a pixel counts as an edge when its magnitude is strictly
//! greater than the threshold.

use serde::{Deserialize, Serialize};

use crate::buffer::{for_each_row, PixelBuffer, CHANNELS};
use crate::error::Result;
use crate::luminance::luma_u8;

/// Rendering style for [`sketch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SketchStyle {
    /// Black edges on white paper.
    #[default]
    Pencil,
    /// Edges shaded by magnitude on white paper.
    Soft,
    /// Grayscale image with darkened edges.
    Gray,
    /// Original colors with darkened edges.
    Colored,
}

impl SketchStyle {
    /// Map the integer style codes used by the widget API (0-3).
    ///
    /// Out-of-range codes clamp to the nearest style.
    pub fn from_code(code: i32) -> Self {
        match code.clamp(0, 3) {
            0 => SketchStyle::Pencil,
            1 => SketchStyle::Soft,
            2 => SketchStyle::Gray,
            _ => SketchStyle::Colored,
        }
    }
}

/// Clamp a threshold into `[0, 255]`.
#[inline]
pub fn clamp_threshold(threshold: i32) -> u8 {
    threshold.clamp(0, 255) as u8
}

/// Apply a sketch effect. Lower thresholds detect more edges.
///
/// Alpha is preserved; dimensions are unchanged.
///
/// # Errors
///
/// `AllocationFailure` if the luma plane or the output can't be allocated.
pub fn sketch(src: &PixelBuffer, style: SketchStyle, threshold: i32) -> Result<PixelBuffer> {
    let threshold_clamped = clamp_threshold(threshold);
    if threshold_clamped as i32 != threshold {
        log::debug!("sketch threshold {} clamped to {}", threshold, threshold_clamped);
    }

    let (w, h) = (src.width() as usize, src.height() as usize);
    let mut luma = src.plane_like(1, 0u8)?;
    for (l, px) in luma.iter_mut().zip(src.iter_pixels()) {
        *l = luma_u8(px);
    }
    let stride = src.stride();
    let src_raw = src.pixels();

    let mut out = src.plane_like(CHANNELS, 0u8)?;
    for_each_row(&mut out, stride, |y, row_out| {
        for x in 0..w {
            let mag = edge_magnitude(&luma, w, h, x, y);
            let idx = x * CHANNELS;
            let src_idx = y * stride + idx;
            let alpha = src_raw[src_idx + 3];
            let is_edge = mag > threshold_clamped;
            let keep = 255 - mag as u32;

            let rgb = match style {
                SketchStyle::Pencil => {
                    let v = if is_edge { 0 } else { 255 };
                    [v, v, v]
                }
                SketchStyle::Soft => {
                    let v = if is_edge { 255 - mag } else { 255 };
                    [v, v, v]
                }
                SketchStyle::Gray => {
                    let l = luma[y * w + x];
                    let v = if is_edge { darken(l, keep) } else { l };
                    [v, v, v]
                }
                SketchStyle::Colored => {
                    let px = &src_raw[src_idx..src_idx + 3];
                    if is_edge {
                        [darken(px[0], keep), darken(px[1], keep), darken(px[2], keep)]
                    } else {
                        [px[0], px[1], px[2]]
                    }
                }
            };

            row_out[idx..idx + 3].copy_from_slice(&rgb);
            row_out[idx + 3] = alpha;
        }
    });

    Ok(PixelBuffer::from_parts(src.width(), src.height(), out))
}

#[inline]
fn darken(v: u8, keep: u32) -> u8 {
    ((v as u32 * keep + 127) / 255) as u8
}

/// Sobel gradient magnitude at `(x, y)`, scaled to 0-255.
fn edge_magnitude(luma: &[u8], w: usize, h: usize, x: usize, y: usize) -> u8 {
    let at = |dx: i64, dy: i64| {
        let sx = (x as i64 + dx).clamp(0, w as i64 - 1) as usize;
        let sy = (y as i64 + dy).clamp(0, h as i64 - 1) as usize;
        luma[sy * w + sx] as i32
    };

    let gx = (at(1, -1) + 2 * at(1, 0) + at(1, 1)) - (at(-1, -1) + 2 * at(-1, 0) + at(-1, 1));
    let gy = (at(-1, 1) + 2 * at(0, 1) + at(1, 1)) - (at(-1, -1) + 2 * at(0, -1) + at(1, -1));

    let mag = ((gx * gx + gy * gy) as f32).sqrt() / 4.0;
    mag.round().min(255.0) as u8
}
