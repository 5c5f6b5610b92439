//! WASM bindings for color adjustments.
//!
//! Every adjustment clamps its parameter into the supported range. The only
//! error is an output buffer that can't be allocated.

use crate::types::{image_to_js, JsPixelBuffer};
use picfix_core::color;
use wasm_bindgen::prelude::*;

/// Add `value` (clamped to -255..=255) to each color channel.
#[wasm_bindgen]
pub fn brightness(image: &JsPixelBuffer, value: i32) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(color::brightness(image.as_core(), value))
}

/// Scale saturation; `level` runs from -100 (gray) to 100.
#[wasm_bindgen]
pub fn saturation(image: &JsPixelBuffer, level: i32) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(color::saturation(image.as_core(), level))
}

/// Rotate hue by `level` degrees, clamped to -180..=180.
#[wasm_bindgen]
pub fn hue(image: &JsPixelBuffer, level: i32) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(color::hue(image.as_core(), level))
}

/// The 4x5 row-major color matrix used by [`hue`], for canvas-side preview.
#[wasm_bindgen]
pub fn hue_matrix(level: i32) -> Vec<f32> {
    color::hue_matrix(level).as_array().to_vec()
}

/// Multiply by a packed `0xAARRGGBB` color.
#[wasm_bindgen]
pub fn shading(image: &JsPixelBuffer, color: u32) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(color::shading(image.as_core(), color))
}

/// Rotate chroma `degree` degrees around the luma axis (wraps at 360).
#[wasm_bindgen]
pub fn tint(image: &JsPixelBuffer, degree: i32) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(color::tint(image.as_core(), degree))
}

/// Black and white.
#[wasm_bindgen]
pub fn black_filter(image: &JsPixelBuffer) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(color::black_filter(image.as_core()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use picfix_core::PixelBuffer;

    fn image(rgba: [u8; 4]) -> JsPixelBuffer {
        JsPixelBuffer::from_core(PixelBuffer::filled(4, 4, rgba).unwrap())
    }

    #[test]
    fn test_brightness_clamps() {
        let result = brightness(&image([250, 10, 128, 255]), 1000).unwrap();
        assert_eq!(&result.pixels()[0..4], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_black_filter_is_gray() {
        let result = black_filter(&image([200, 50, 10, 255])).unwrap();
        let p = &result.pixels()[0..4];
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
    }

    #[test]
    fn test_saturation_minimum_is_gray() {
        let result = saturation(&image([200, 50, 10, 255]), -100).unwrap();
        let p = &result.pixels()[0..4];
        assert!(p[0].abs_diff(p[1]) <= 1);
        assert!(p[1].abs_diff(p[2]) <= 1);
    }

    #[test]
    fn test_hue_zero_is_identity() {
        let src = image([200, 50, 10, 255]);
        assert_eq!(hue(&src, 0).unwrap().pixels(), src.pixels());
    }

    #[test]
    fn test_hue_matrix_shape() {
        assert_eq!(hue_matrix(45).len(), 20);
    }

    #[test]
    fn test_shading_white_is_identity() {
        let src = image([200, 50, 10, 255]);
        assert_eq!(shading(&src, 0xFFFFFFFF).unwrap().pixels(), src.pixels());
    }

    #[test]
    fn test_tint_keeps_dimensions() {
        let result = tint(&image([100, 100, 100, 255]), 50).unwrap();
        assert_eq!((result.width(), result.height()), (4, 4));
    }
}
