//! WASM-compatible wrapper types for image data.

use picfix_core::transform::FilterType;
use picfix_core::PixelBuffer;
use wasm_bindgen::prelude::*;

/// An RGBA image held on the WASM side.
///
/// Pixel data stays in WASM memory between calls; `pixels()` copies it out
/// when the display layer needs to draw.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Wrap RGBA pixel data (4 bytes per pixel, row-major).
    ///
    /// Fails when the dimensions are zero or the data length doesn't match.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::new(width, height, pixels)
            .map(Self::from_core)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Build from packed `0xAARRGGBB` words, as read from a canvas bitmap.
    pub fn from_argb(width: u32, height: u32, argb: Vec<u32>) -> Result<JsPixelBuffer, JsValue> {
        let pixels = argb
            .into_iter()
            .flat_map(picfix_core::rgba_from_argb)
            .collect();
        Self::new(width, height, pixels)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Copy of the RGBA bytes.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Copy of the pixels as packed `0xAARRGGBB` words.
    pub fn to_argb(&self) -> Vec<u32> {
        self.inner
            .iter_pixels()
            .map(picfix_core::argb_from_rgba)
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Explicitly release WASM memory held by this image.
    pub fn free(self) {
        drop(self);
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_core(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &PixelBuffer {
        &self.inner
    }
}

/// Map the JS filter code (0 = nearest, 1 = bilinear, 2 = lanczos3).
///
/// Unknown codes fall back to bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Wrap a core result for JS: errors become their display string.
pub(crate) fn to_js<T, E: std::fmt::Display>(result: Result<T, E>) -> Result<T, JsValue> {
    result.map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Same as [`to_js`], wrapping the buffer for JS.
pub(crate) fn image_to_js<E: std::fmt::Display>(
    result: Result<PixelBuffer, E>,
) -> Result<JsPixelBuffer, JsValue> {
    to_js(result).map(JsPixelBuffer::from_core)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_rejects_short_data() {
        assert!(JsPixelBuffer::new(4, 4, vec![0u8; 10]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_zero_width() {
        assert!(JsPixelBuffer::new(0, 4, Vec::new()).is_err());
    }
}
