//! Resampling to new dimensions using the `image` crate's filters.
//!
//! All functions return new buffers without modifying the input. Alpha is
//! resampled like any other channel.

use serde::{Deserialize, Serialize};

use crate::buffer::{check_dimensions, PixelBuffer};
use crate::config::Limits;
use crate::error::{PicFixError, Result};

/// Filter type for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, blocky).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize an image to exact dimensions. Aspect ratio is not preserved.
///
/// # Errors
///
/// `InvalidDimensions` if either target dimension is zero, `AllocationFailure`
/// if the target exceeds the default limits.
pub fn resize(image: &PixelBuffer, width: u32, height: u32, filter: FilterType) -> Result<PixelBuffer> {
    resize_within(image, width, height, filter, &Limits::default())
}

pub(crate) fn resize_within(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
    limits: &Limits,
) -> Result<PixelBuffer> {
    check_dimensions(width, height, limits)?;

    // Fast path: if dimensions match, just clone
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    let rgba = image.to_rgba_image().ok_or(PicFixError::InvalidPixelData {
        expected: image.pixel_count() * crate::buffer::CHANNELS,
        actual: image.pixels().len(),
    })?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());
    PixelBuffer::from_rgba_image_within(resized, limits)
}

/// Downscale so the longest edge is at most `max_edge`, preserving aspect ratio.
///
/// Images that already fit are returned unchanged; this never upscales.
///
/// # Errors
///
/// `InvalidDimensions` if `max_edge` is zero.
pub fn resize_to_fit(image: &PixelBuffer, max_edge: u32, filter: FilterType) -> Result<PixelBuffer> {
    resize_to_fit_within(image, max_edge, filter, &Limits::default())
}

pub(crate) fn resize_to_fit_within(
    image: &PixelBuffer,
    max_edge: u32,
    filter: FilterType,
    limits: &Limits,
) -> Result<PixelBuffer> {
    if max_edge == 0 {
        return Err(PicFixError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    let (src_width, src_height) = image.dimensions();
    if src_width <= max_edge && src_height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = calculate_fit_dimensions(src_width, src_height, max_edge);
    log::debug!(
        "resize_to_fit {}x{} -> {}x{}",
        src_width,
        src_height,
        new_width,
        new_height
    );
    resize_within(image, new_width, new_height, filter, limits)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::test_support::gradient;

    #[test]
    fn test_resize_basic() {
        let img = gradient(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.dimensions(), (50, 25));
        assert_eq!(resized.pixels().len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_same_dimensions_is_copy() {
        let img = gradient(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Lanczos3).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_ignores_aspect_ratio() {
        let img = gradient(40, 40);
        let resized = resize(&img, 120, 7, FilterType::Bilinear).unwrap();
        assert_eq!(resized.dimensions(), (120, 7));
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = gradient(100, 50);

        assert!(matches!(
            resize(&img, 0, 50, FilterType::Bilinear),
            Err(PicFixError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            resize(&img, 50, 0, FilterType::Bilinear),
            Err(PicFixError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_resize_respects_limits() {
        let img = gradient(10, 10);
        let limits = Limits { max_pixels: 100 };
        assert!(matches!(
            resize_within(&img, 20, 20, FilterType::Bilinear, &limits),
            Err(PicFixError::AllocationFailure { .. })
        ));
    }

    #[test]
    fn test_uniform_color_survives_resize() {
        let img = PixelBuffer::filled(8, 8, [10, 200, 30, 255]).unwrap();
        for filter in [FilterType::Nearest, FilterType::Bilinear, FilterType::Lanczos3] {
            let resized = resize(&img, 13, 5, filter).unwrap();
            assert!(resized.iter_pixels().all(|p| p == [10, 200, 30, 255]));
        }
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = gradient(600, 400);
        let resized = resize_to_fit(&img, 256, FilterType::Lanczos3).unwrap();
        assert_eq!(resized.dimensions(), (256, 171));
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let img = gradient(400, 600);
        let resized = resize_to_fit(&img, 256, FilterType::Bilinear).unwrap();
        assert_eq!(resized.dimensions(), (171, 256));
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = gradient(100, 50);
        let resized = resize_to_fit(&img, 256, FilterType::Bilinear).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_to_fit_zero_max_edge_error() {
        let img = gradient(100, 50);
        assert!(resize_to_fit(&img, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        assert_eq!(calculate_fit_dimensions(6000, 4000, 2560), (2560, 1707));
        assert_eq!(calculate_fit_dimensions(4000, 6000, 2560), (1707, 2560));
        assert_eq!(calculate_fit_dimensions(4000, 4000, 256), (256, 256));
        assert_eq!(calculate_fit_dimensions(10000, 1, 100), (100, 1));
    }
}
