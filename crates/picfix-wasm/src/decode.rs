//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG or PNG, applying EXIF orientation
//! - [`decode_image_raw_orientation`] - Decode without applying orientation
//! - [`image_orientation`] - Read the EXIF orientation value (1-8)
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit } from '@picfix/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const preview = resize_to_fit(image, 2048, 1);
//! console.log(`Preview: ${preview.width}x${preview.height}`);
//! ```

use crate::types::{image_to_js, JsPixelBuffer};
use picfix_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG into RGBA.
///
/// EXIF orientation is applied so the result is displayed upright.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a supported image format
/// - The file is corrupted or truncated
/// - The decoded image exceeds the pixel limit
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(decode::decode_image(bytes))
}

/// Decode without applying EXIF orientation.
#[wasm_bindgen]
pub fn decode_image_raw_orientation(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(decode::decode_image_no_orientation(bytes))
}

/// EXIF orientation value (1-8); 1 when absent or unreadable.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_invalid_bytes() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }
}
