//! WASM bindings for compositing.
//!
//! Fonts and frame catalogs are loaded once into WASM-side handles and
//! passed back in on each call.
//!
//! # Example
//!
//! ```typescript
//! const font = new JsFont(new Uint8Array(await fontFile.arrayBuffer()));
//! const marked = watermark(image, font, '© 2024', 20, 580, 0xFFFFFFFF, 180, 32, false);
//!
//! const frames = new JsFrameCatalog();
//! frames.add_encoded(new Uint8Array(await frameFile.arrayBuffer()));
//! const framed = frame_overlay(marked, frames, 0);
//! ```

use crate::types::{image_to_js, to_js, JsPixelBuffer};
use picfix_core::composite::{self, AbGlyphRasterizer, MemoryFrameCatalog, Placement, Watermark};
use picfix_core::decode;
use picfix_core::FrameCatalog;
use wasm_bindgen::prelude::*;

/// A parsed TrueType/OpenType font for watermarks.
#[wasm_bindgen]
pub struct JsFont {
    inner: AbGlyphRasterizer,
}

#[wasm_bindgen]
impl JsFont {
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: Vec<u8>) -> Result<JsFont, JsValue> {
        to_js(AbGlyphRasterizer::from_bytes(bytes)).map(|inner| JsFont { inner })
    }
}

impl JsFont {
    pub(crate) fn as_core(&self) -> &AbGlyphRasterizer {
        &self.inner
    }
}

/// An ordered set of decorative frames, addressed by index.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsFrameCatalog {
    inner: MemoryFrameCatalog,
}

#[wasm_bindgen]
impl JsFrameCatalog {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsFrameCatalog {
        Self::default()
    }

    /// Append an already decoded frame.
    pub fn add_image(&mut self, frame: &JsPixelBuffer) {
        self.inner.push(frame.as_core().clone());
    }

    /// Decode a PNG or JPEG frame and append it.
    pub fn add_encoded(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let frame = to_js(decode::decode_image(bytes))?;
        self.inner.push(frame);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }
}

impl JsFrameCatalog {
    pub(crate) fn as_core(&self) -> &MemoryFrameCatalog {
        &self.inner
    }
}

/// Blend `overlay` onto `base` with its top-left corner at (`x`, `y`).
///
/// Fails if the overlay doesn't fit inside the base at that position.
#[wasm_bindgen]
pub fn overlay(
    base: &JsPixelBuffer,
    overlay: &JsPixelBuffer,
    x: u32,
    y: u32,
) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(composite::overlay(
        base.as_core(),
        overlay.as_core(),
        Placement::new(x, y),
    ))
}

/// Scale `overlay` to the base size and blend it over the whole image.
#[wasm_bindgen]
pub fn overlay_full_frame(
    base: &JsPixelBuffer,
    overlay: &JsPixelBuffer,
) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(composite::overlay_full_frame(
        base.as_core(),
        overlay.as_core(),
    ))
}

/// Draw `text` with its baseline origin at (`x`, `y`).
///
/// `color` is `0xAARRGGBB`; `alpha` (0-255) scales the text opacity.
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn watermark(
    image: &JsPixelBuffer,
    font: &JsFont,
    text: String,
    x: u32,
    y: u32,
    color: u32,
    alpha: i32,
    size: u32,
    underline: bool,
) -> Result<JsPixelBuffer, JsValue> {
    let params = Watermark {
        text,
        x,
        y,
        color,
        alpha,
        size,
        underline,
    };
    image_to_js(composite::watermark(
        image.as_core(),
        &params,
        font.as_core(),
    ))
}

/// Overlay frame `index` from `catalog`, scaled to the image.
#[wasm_bindgen]
pub fn frame_overlay(
    image: &JsPixelBuffer,
    catalog: &JsFrameCatalog,
    index: usize,
) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(composite::frame_overlay(
        image.as_core(),
        catalog.as_core(),
        index,
    ))
}

/// Overlay a frame and export the result as a full-quality JPEG.
#[wasm_bindgen]
pub fn framed_jpeg(
    image: &JsPixelBuffer,
    catalog: &JsFrameCatalog,
    index: usize,
) -> Result<Vec<u8>, JsValue> {
    to_js(composite::framed_jpeg(
        image.as_core(),
        catalog.as_core(),
        index,
    ))
}

/// Scatter snowflakes; `density` runs from 0 to 1.
///
/// The same `seed` always gives the same flakes.
#[wasm_bindgen]
pub fn snow(image: &JsPixelBuffer, density: f32, seed: u32) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(composite::snow(image.as_core(), density, u64::from(seed)))
}

/// Scatter opaque specks of random color; `density` runs from 0 to 1.
///
/// The same `seed` always gives the same specks.
#[wasm_bindgen]
pub fn flea(image: &JsPixelBuffer, density: f32, seed: u32) -> Result<JsPixelBuffer, JsValue> {
    image_to_js(composite::flea(image.as_core(), density, u64::from(seed)))
}
