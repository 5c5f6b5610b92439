//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg } from '@picfix/wasm';
//!
//! const jpegBytes = encode_jpeg(edited, 90);
//! const blob = new Blob([jpegBytes], { type: 'image/jpeg' });
//! ```

use crate::types::{to_js, JsPixelBuffer};
use picfix_core::encode;
use wasm_bindgen::prelude::*;

/// Encode as JPEG.
///
/// Transparent areas are flattened over black. `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsPixelBuffer, quality: u8) -> Result<Vec<u8>, JsValue> {
    to_js(encode::encode_jpeg(image.as_core(), quality))
}

/// Encode as PNG, keeping the alpha channel.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    to_js(encode::encode_png(image.as_core()))
}
