//! WASM bindings for neighborhood filters.

use crate::types::{image_to_js, JsPixelBuffer};
use picfix_core::convolve::{self, SketchStyle};
use wasm_bindgen::prelude::*;

/// Gaussian blur with `radius` clamped to 1..=25.
#[wasm_bindgen]
pub fn blur(image: &JsPixelBuffer, radius: f32) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(convolve::blur(image.as_core(), radius))
}

/// Edge-detection sketch.
///
/// `style`: 0 = pencil, 1 = soft, 2 = gray, 3 = colored. `threshold` is
/// clamped to 0..=255; higher values keep fewer edges.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const drawing = sketch(sourceImage, 0, 40);
/// ```
#[wasm_bindgen]
pub fn sketch(
    image: &JsPixelBuffer,
    style: i32,
    threshold: i32,
) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(convolve::sketch(
        image.as_core(),
        SketchStyle::from_code(style),
        threshold,
    ))
}
