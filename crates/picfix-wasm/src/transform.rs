//! WASM bindings for geometric transforms.
//!
//! Rotation, flip, crop and resize all return a new `JsPixelBuffer`; the
//! source stays untouched so the editor can keep it for undo.

use crate::types::{filter_from_u8, image_to_js, JsPixelBuffer};
use picfix_core::transform::{self, FlipAxis, InterpolationFilter, Orientation};
use wasm_bindgen::prelude::*;

/// Rotate an image around its center.
///
/// The canvas grows to fit the rotated content. Corners not covered by the
/// source are transparent.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise)
/// * `use_lanczos` - Use high-quality Lanczos3 filter (slower), otherwise bilinear
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Preview rotation (fast, bilinear)
/// const rotated = rotate(sourceImage, 15.0, false);
///
/// // Export rotation (high quality, lanczos)
/// const exported = rotate(sourceImage, 15.0, true);
/// ```
#[wasm_bindgen]
pub fn rotate(
    image: &JsPixelBuffer,
    angle_degrees: f64,
    use_lanczos: bool,
) -> Result<JsPixelBuffer, JsValue> {
    let filter = if use_lanczos {
        InterpolationFilter::Lanczos3
    } else {
        InterpolationFilter::Bilinear
    };
    image_to_js(transform::apply_rotation(
        image.as_core(),
        angle_degrees,
        filter,
    ))
}

/// Mirror an image.
///
/// `flip_type` 1 flips top to bottom; any other value flips left to right.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const mirrored = flip(sourceImage, 0);
/// ```
#[wasm_bindgen]
pub fn flip(image: &JsPixelBuffer, flip_type: i32) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(transform::flip(
        image.as_core(),
        FlipAxis::from_code(flip_type),
    ))
}

/// Crop a rectangle given in pixel coordinates.
///
/// Fails if the rectangle is empty or extends past the image.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = crop(sourceImage, 10, 10, 200, 150);
/// ```
#[wasm_bindgen]
pub fn crop(
    image: &JsPixelBuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(transform::crop(image.as_core(), x, y, width, height))
}

/// Resize to exact dimensions.
///
/// `filter`: 0 = nearest, 1 = bilinear, 2 = lanczos3.
#[wasm_bindgen]
pub fn resize(
    image: &JsPixelBuffer,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(transform::resize(
        image.as_core(),
        width,
        height,
        filter_from_u8(filter),
    ))
}

/// Resize so the longest edge equals `max_edge`, keeping the aspect ratio.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsPixelBuffer,
    max_edge: u32,
    filter: u8,
) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(transform::resize_to_fit(
        image.as_core(),
        max_edge,
        filter_from_u8(filter),
    ))
}

/// Apply an EXIF orientation value (1-8). Unknown values leave the image as is.
#[wasm_bindgen]
pub fn apply_orientation(image: &JsPixelBuffer, orientation: u32) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(transform::apply_orientation(
        image.as_core(),
        Orientation::from(orientation),
    ))
}
