//! The RGBA raster every transform reads and writes.
//!
//! A [`PixelBuffer`] is immutable once built: its fields are private and every
//! transform allocates a fresh output. Construction enforces the three
//! invariants the rest of the crate relies on:
//!
//! - width and height are non-zero
//! - `pixels.len() == width * height * 4`
//! - `width * height` is within [`Limits::max_pixels`]

use crate::config::Limits;
use crate::error::{PicFixError, Result};

/// One RGBA8 pixel: `[red, green, blue, alpha]`.
pub type Rgba = [u8; 4];

/// Bytes per pixel.
pub const CHANNELS: usize = 4;

/// Unpack an Android-style `0xAARRGGBB` color.
#[inline]
pub fn rgba_from_argb(packed: u32) -> Rgba {
    [
        (packed >> 16) as u8,
        (packed >> 8) as u8,
        packed as u8,
        (packed >> 24) as u8,
    ]
}

/// Pack an RGBA pixel into `0xAARRGGBB`.
#[inline]
pub fn argb_from_rgba([r, g, b, a]: Rgba) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// A dense row-major RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw RGBA data.
    ///
    /// # Errors
    ///
    /// - `InvalidDimensions` if either dimension is zero
    /// - `AllocationFailure` if the size exceeds the default [`Limits`]
    /// - `InvalidPixelData` if `pixels.len() != width * height * 4`
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height, &Limits::default())?;
        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(PicFixError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self> {
        let mut pixels = allocate(width, height, &Limits::default())?;
        for px in pixels.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&color);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> Result<Self> {
        Self::blank(width, height, &Limits::default())
    }

    /// Zeroed buffer checked against `limits`.
    pub(crate) fn blank(width: u32, height: u32, limits: &Limits) -> Result<Self> {
        let pixels = allocate(width, height, limits)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap pixel data produced by a transform that already upheld the invariants.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0, "Zero-sized buffer");
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a PixelBuffer from an `image::RgbaImage`, checked against the
    /// default [`Limits`].
    pub fn from_rgba_image(img: image::RgbaImage) -> Result<Self> {
        Self::from_rgba_image_within(img, &Limits::default())
    }

    pub(crate) fn from_rgba_image_within(img: image::RgbaImage, limits: &Limits) -> Result<Self> {
        let (width, height) = img.dimensions();
        check_dimensions(width, height, limits)?;
        let pixels = img.into_raw();
        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(PicFixError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::from_parts(width, height, pixels))
    }

    /// Convert to an `image::RgbaImage` for codec or resampling work.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return its RGBA bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes in one row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the buffer.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Read a pixel with clamp-to-edge addressing.
    #[inline]
    pub fn pixel_clamped(&self, x: i64, y: i64) -> Rgba {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.pixel(cx, cy)
    }

    /// One row of RGBA bytes.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// Iterate over pixels in row-major order.
    pub fn iter_pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Apply a per-pixel function, producing a new buffer of the same size.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the output can't be allocated.
    pub fn map_pixels<F>(&self, f: F) -> Result<PixelBuffer>
    where
        F: Fn(Rgba) -> Rgba + Send + Sync,
    {
        let mut out = self.plane_like(CHANNELS, 0u8)?;
        for_each_row(&mut out, self.stride(), |y, row_out| {
            let row_in = self.row(y as u32);
            for (src, dst) in row_in
                .chunks_exact(CHANNELS)
                .zip(row_out.chunks_exact_mut(CHANNELS))
            {
                dst.copy_from_slice(&f([src[0], src[1], src[2], src[3]]));
            }
        });
        Ok(PixelBuffer::from_parts(self.width, self.height, out))
    }

    /// A plane of `per_pixel` values per pixel, the same size as `self`.
    ///
    /// `self` already passed the size guard, so only allocator failure is
    /// reported.
    pub(crate) fn plane_like<T: Clone>(&self, per_pixel: usize, fill: T) -> Result<Vec<T>> {
        try_filled(
            self.pixel_count() * per_pixel,
            fill,
            self.dimensions(),
            &Limits::default(),
        )
    }

    /// Fallible copy of the RGBA bytes.
    pub(crate) fn try_clone_pixels(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.try_reserve_exact(self.pixels.len())
            .map_err(|_| allocation_failure(self.dimensions(), &Limits::default()))?;
        out.extend_from_slice(&self.pixels);
        Ok(out)
    }
}

/// Validate dimensions against `limits` without allocating.
pub(crate) fn check_dimensions(width: u32, height: u32, limits: &Limits) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PicFixError::InvalidDimensions { width, height });
    }
    if !limits.allows(width, height) {
        return Err(PicFixError::AllocationFailure {
            width,
            height,
            limit: limits.max_pixels,
        });
    }
    Ok(())
}

/// Allocate a zeroed RGBA buffer, reporting allocator failure instead of aborting.
pub(crate) fn allocate(width: u32, height: u32, limits: &Limits) -> Result<Vec<u8>> {
    allocate_plane(width, height, CHANNELS, 0u8, limits)
}

/// Allocate `per_pixel` values per pixel for a `width x height` image.
///
/// The size is checked against `limits` first, then reserved with
/// `try_reserve_exact`.
pub(crate) fn allocate_plane<T: Clone>(
    width: u32,
    height: u32,
    per_pixel: usize,
    fill: T,
    limits: &Limits,
) -> Result<Vec<T>> {
    check_dimensions(width, height, limits)?;
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(per_pixel))
        .ok_or_else(|| allocation_failure((width, height), limits))?;
    try_filled(len, fill, (width, height), limits)
}

fn try_filled<T: Clone>(len: usize, fill: T, dims: (u32, u32), limits: &Limits) -> Result<Vec<T>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| allocation_failure(dims, limits))?;
    values.resize(len, fill);
    Ok(values)
}

fn allocation_failure((width, height): (u32, u32), limits: &Limits) -> PicFixError {
    PicFixError::AllocationFailure {
        width,
        height,
        limit: limits.max_pixels,
    }
}

/// Run `f(y, row)` over every `row_len`-element row of an output buffer.
///
/// Rows are independent units of work, so with the `parallel` feature they
/// are distributed over the rayon pool.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_row<T, F>(out: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    use rayon::prelude::*;

    out.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row<T, F>(out: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    out.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}
