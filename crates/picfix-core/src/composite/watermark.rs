//! Text watermarks.
//!
//! Text shaping is delegated to a [`TextRasterizer`], which turns a string into
//! a single-channel coverage mask positioned relative to the baseline origin.
//! The watermark then tints that mask with the requested color and alpha and
//! composites it with the regular source-over rule.

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use serde::{Deserialize, Serialize};

use super::blend::blend_pixel;
use crate::buffer::{allocate_plane, rgba_from_argb, PixelBuffer, CHANNELS};
use crate::config::Limits;
use crate::decode::DecodeError;
use crate::error::{PicFixError, Result};

/// Coverage mask for a line of text.
///
/// `left` and `top` give the offset of the mask's top-left pixel from the
/// baseline origin; `top` is negative for glyphs that rise above the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphMask {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
    left: i32,
    top: i32,
    advance: u32,
}

impl GlyphMask {
    /// Build a mask, checking that `coverage` holds `width * height` bytes.
    pub fn new(
        width: u32,
        height: u32,
        coverage: Vec<u8>,
        left: i32,
        top: i32,
        advance: u32,
    ) -> Result<Self> {
        let expected = width as usize * height as usize;
        if coverage.len() != expected {
            return Err(PicFixError::InvalidPixelData {
                expected,
                actual: coverage.len(),
            });
        }
        Ok(Self {
            width,
            height,
            coverage,
            left,
            top,
            advance,
        })
    }

    /// An empty mask that only carries a pen advance.
    pub fn empty(advance: u32) -> Self {
        Self {
            advance,
            ..Self::default()
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    /// Horizontal pen advance of the whole string, used for underlines.
    pub fn advance(&self) -> u32 {
        self.advance
    }

    /// Coverage at mask coordinates; 0 outside the mask.
    pub fn coverage(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0;
        }
        self.coverage[y as usize * self.width as usize + x as usize]
    }
}

/// Renders text into a coverage mask.
pub trait TextRasterizer {
    /// Rasterize `text` at a pixel height of `size`.
    ///
    /// The mask buffer must fit within `limits`; report `AllocationFailure`
    /// otherwise.
    fn rasterize(&self, text: &str, size: f32, limits: &Limits) -> Result<GlyphMask>;
}

/// [`TextRasterizer`] backed by an `ab_glyph` font.
#[derive(Clone)]
pub struct AbGlyphRasterizer {
    font: FontArc,
}

impl std::fmt::Debug for AbGlyphRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbGlyphRasterizer").finish_non_exhaustive()
    }
}

impl AbGlyphRasterizer {
    /// Load a TrueType/OpenType font from its file bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> std::result::Result<Self, DecodeError> {
        let font = FontArc::try_from_vec(bytes).map_err(|e| DecodeError::InvalidFont(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_font(font: FontArc) -> Self {
        Self { font }
    }
}

impl TextRasterizer for AbGlyphRasterizer {
    fn rasterize(&self, text: &str, size: f32, limits: &Limits) -> Result<GlyphMask> {
        let scale = PxScale::from(size);
        let scaled = self.font.as_scaled(scale);

        // Lay out on a baseline at y = 0
        let mut glyphs = Vec::with_capacity(text.len());
        let mut cursor_x = 0.0f32;
        let mut last: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(prev) = last {
                cursor_x += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scale, point(cursor_x, 0.0)));
            cursor_x += scaled.h_advance(id);
            last = Some(id);
        }
        let advance = cursor_x.max(0.0).round() as u32;

        let outlined: Vec<_> = glyphs
            .into_iter()
            .filter_map(|g| self.font.outline_glyph(g))
            .collect();
        if outlined.is_empty() {
            return Ok(GlyphMask::empty(advance));
        }

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for g in &outlined {
            let b = g.px_bounds();
            min_x = min_x.min(b.min.x);
            min_y = min_y.min(b.min.y);
            max_x = max_x.max(b.max.x);
            max_y = max_y.max(b.max.y);
        }

        // Float to int casts saturate, so oversized extents fail the limit check
        let left = min_x.floor() as i32;
        let top = min_y.floor() as i32;
        let width = (max_x.ceil() - min_x.floor()).max(1.0) as u32;
        let height = (max_y.ceil() - min_y.floor()).max(1.0) as u32;
        let mut coverage = allocate_plane(width, height, 1, 0u8, limits)?;

        for g in &outlined {
            let b = g.px_bounds();
            let ox = b.min.x as i32 - left;
            let oy = b.min.y as i32 - top;
            g.draw(|px, py, cov| {
                let x = ox + px as i32;
                let y = oy + py as i32;
                if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                    let idx = y as usize * width as usize + x as usize;
                    let v = (cov.clamp(0.0, 1.0) * 255.0).round() as u8;
                    coverage[idx] = coverage[idx].max(v);
                }
            });
        }

        Ok(GlyphMask {
            width,
            height,
            coverage,
            left,
            top,
            advance,
        })
    }
}

/// Parameters for [`watermark`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watermark {
    pub text: String,
    /// Left end of the text baseline, in base pixels.
    pub x: u32,
    pub y: u32,
    /// Packed `0xAARRGGBB`; only the RGB part is used.
    pub color: u32,
    /// Text opacity, clamped to `[0, 255]`.
    pub alpha: i32,
    /// Text pixel height, clamped to `[1, max(width, height)]` of the base.
    pub size: u32,
    #[serde(default)]
    pub underline: bool,
}

/// Underline stroke thickness for a text size.
pub fn underline_thickness(size: u32) -> u32 {
    (size / 18).max(1)
}

/// Gap between the baseline and the top of the underline stroke.
fn underline_offset(size: u32) -> u32 {
    (size / 10).max(1)
}

/// Draw `params.text` onto `base`.
///
/// Glyph pixels past the base edges are clipped.
///
/// # Errors
///
/// - `OutOfBounds` if the baseline origin lies outside `base`
/// - `AllocationFailure` if the text mask or output can't be allocated
pub fn watermark(
    base: &PixelBuffer,
    params: &Watermark,
    rasterizer: &dyn TextRasterizer,
) -> Result<PixelBuffer> {
    watermark_within(base, params, rasterizer, &Limits::default())
}

pub(crate) fn watermark_within(
    base: &PixelBuffer,
    params: &Watermark,
    rasterizer: &dyn TextRasterizer,
    limits: &Limits,
) -> Result<PixelBuffer> {
    let (bw, bh) = base.dimensions();
    if params.x >= bw || params.y >= bh {
        return Err(PicFixError::out_of_bounds(
            (params.x, params.y, 1, 1),
            (bw, bh),
        ));
    }

    let alpha = params.alpha.clamp(0, 255) as u32;
    if alpha as i32 != params.alpha {
        log::debug!("watermark alpha {} clamped to {}", params.alpha, alpha);
    }
    let [r, g, b, _] = rgba_from_argb(params.color);
    let size = params.size.clamp(1, bw.max(bh));
    if size != params.size {
        log::debug!("watermark size {} clamped to {}", params.size, size);
    }
    let mask = rasterizer.rasterize(&params.text, size as f32, limits)?;

    let origin_x = params.x as i64;
    let origin_y = params.y as i64;
    let underline = params.underline.then(|| {
        let top = origin_y + underline_offset(size) as i64;
        (top, top + underline_thickness(size) as i64)
    });

    // Union of glyph mask and underline stroke, in base coordinates
    let mut x0 = origin_x + mask.left as i64;
    let mut y0 = origin_y + mask.top as i64;
    let mut x1 = x0 + mask.width as i64;
    let mut y1 = y0 + mask.height as i64;
    if let Some((top, bottom)) = underline {
        if mask.width == 0 {
            (x0, y0, x1, y1) = (origin_x, top, origin_x, bottom);
        }
        x0 = x0.min(origin_x);
        x1 = x1.max(origin_x + mask.advance as i64);
        y0 = y0.min(top);
        y1 = y1.max(bottom);
    }

    let cx0 = x0.clamp(0, bw as i64) as usize;
    let cx1 = x1.clamp(0, bw as i64) as usize;
    let cy0 = y0.clamp(0, bh as i64) as usize;
    let cy1 = y1.clamp(0, bh as i64) as usize;

    let stride = base.stride();
    let mut out = base.try_clone_pixels()?;
    for y in cy0..cy1 {
        let in_underline = underline.is_some_and(|(top, bottom)| (top..bottom).contains(&(y as i64)));
        for x in cx0..cx1 {
            let mut cov = mask.coverage(
                x as i64 - origin_x - mask.left as i64,
                y as i64 - origin_y - mask.top as i64,
            );
            if in_underline && (origin_x..origin_x + mask.advance as i64).contains(&(x as i64)) {
                cov = 255;
            }
            if cov == 0 {
                continue;
            }

            let a = ((alpha * cov as u32 + 127) / 255) as u8;
            let idx = y * stride + x * CHANNELS;
            let px = &mut out[idx..idx + CHANNELS];
            let blended = blend_pixel([px[0], px[1], px[2], px[3]], [r, g, b, a]);
            px.copy_from_slice(&blended);
        }
    }

    Ok(PixelBuffer::from_parts(bw, bh, out))
}



#[cfg(test)]
mod font_tests {
    use super::*;

    const DEJAVU_SANS: &[u8] = include_bytes!("../../testdata/DejaVuSans.ttf");

    fn font() -> AbGlyphRasterizer {
        AbGlyphRasterizer::from_bytes(DEJAVU_SANS.to_vec()).unwrap()
    }

    fn white_text(text: &str, x: u32, y: u32, size: u32) -> Watermark {
        Watermark {
            text: text.to_string(),
            x,
            y,
            color: 0xFFFFFFFF,
            alpha: 255,
            size,
            underline: false,
        }
    }

    #[test]
    fn test_mask_sits_on_baseline() {
        let mask = font().rasterize("Hi", 32.0, &Limits::default()).unwrap();
        assert!(mask.width() > 0 && mask.height() > 0);
        assert!(mask.top() < 0, "top {}", mask.top());
        assert!(mask.advance() > 0);
        // Neither glyph has a descender
        assert!(mask.top() + mask.height() as i32 <= 1);

        let inked = (0..mask.height() as i64)
            .flat_map(|y| (0..mask.width() as i64).map(move |x| (x, y)))
            .filter(|&(x, y)| mask.coverage(x, y) > 0)
            .count();
        assert!(inked > 0);
    }

    #[test]
    fn test_whitespace_has_advance_only() {
        let mask = font().rasterize("   ", 24.0, &Limits::default()).unwrap();
        assert_eq!((mask.width(), mask.height()), (0, 0));
        assert!(mask.advance() > 0);
    }

    #[test]
    fn test_drawn_pixels_stay_near_baseline() {
        let base = PixelBuffer::filled(64, 48, [0, 0, 0, 255]).unwrap();
        let (x, y, size) = (4u32, 36u32, 20u32);
        let out = watermark(&base, &white_text("Hi", x, y, size), &font()).unwrap();

        let mut changed = 0;
        for py in 0..48 {
            for px in 0..64 {
                if out.pixel(px, py) != base.pixel(px, py) {
                    changed += 1;
                    assert!(py + size >= y && py <= y, "pixel ({}, {})", px, py);
                    assert!(px + 1 >= x, "pixel ({}, {})", px, py);
                }
            }
        }
        assert!(changed > 0);
    }

    #[test]
    fn test_oversized_request_on_small_image() {
        let base = PixelBuffer::filled(64, 64, [0, 0, 0, 255]).unwrap();
        let out = watermark(&base, &white_text("W", 0, 63, 200_000), &font()).unwrap();
        assert_eq!(out.dimensions(), (64, 64));
        assert_ne!(out, base);
    }

    #[test]
    fn test_mask_over_limit_is_error() {
        let result = font().rasterize("W", 1.0e7, &Limits::default());
        assert!(matches!(result, Err(PicFixError::AllocationFailure { .. })));

        let base = PixelBuffer::filled(64, 64, [0, 0, 0, 255]).unwrap();
        let tight = Limits { max_pixels: 100 };
        let result = watermark_within(&base, &white_text("W", 0, 63, 64), &font(), &tight);
        assert!(matches!(result, Err(PicFixError::AllocationFailure { .. })));
    }
}
