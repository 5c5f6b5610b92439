//! WASM bindings for the operation pipeline.
//!
//! Operations cross the boundary as plain objects tagged by `op`, so the
//! editor can keep its edit history as JSON and replay it here.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const pipeline = new JsPipeline({ rotation_filter: 'Lanczos3' });
//! pipeline.set_font(font);
//!
//! const edited = pipeline.apply_all(image, [
//!   { op: 'brightness', value: 20 },
//!   { op: 'rotate', degrees: 90 },
//!   { op: 'watermark', text: 'hello', x: 10, y: 40, color: 0xFFFFFFFF, alpha: 200, size: 24 },
//! ]);
//! ```

use crate::composite::{JsFont, JsFrameCatalog};
use crate::types::{image_to_js, to_js, JsPixelBuffer};
use picfix_core::{Operation, Pipeline, PipelineConfig, PixelBuffer};
use wasm_bindgen::prelude::*;

/// A configured pipeline with its optional font and frame catalog.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsPipeline {
    config: PipelineConfig,
    font: Option<JsFont>,
    frames: Option<JsFrameCatalog>,
}

#[wasm_bindgen]
impl JsPipeline {
    /// Create a pipeline from a (possibly partial) config object.
    ///
    /// `undefined` or `null` gives the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsPipeline, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            PipelineConfig::default()
        } else {
            to_js(serde_wasm_bindgen::from_value(config))?
        };
        Ok(Self::with_config(config))
    }

    /// Pipeline tuned for final export (Lanczos3 resize and rotation).
    pub fn export() -> JsPipeline {
        Self::with_config(PipelineConfig::export())
    }

    /// Font used by `watermark` operations. Takes ownership of `font`.
    pub fn set_font(&mut self, font: JsFont) {
        self.font = Some(font);
    }

    /// Catalog used by `frame` operations. Takes ownership of `frames`.
    pub fn set_frames(&mut self, frames: JsFrameCatalog) {
        self.frames = Some(frames);
    }

    /// Current configuration as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        to_js(serde_wasm_bindgen::to_value(&self.config))
    }

    /// Apply one operation object.
    pub fn apply(&self, image: &JsPixelBuffer, op: JsValue) -> Result<JsPixelBuffer, JsValue> {
        let op: Operation = to_js(serde_wasm_bindgen::from_value(op))?;
        image_to_js(self.run(image.as_core(), std::slice::from_ref(&op)))
    }

    /// Apply an array of operation objects in order.
    ///
    /// Stops at the first failing operation.
    pub fn apply_all(&self, image: &JsPixelBuffer, ops: JsValue) -> Result<JsPixelBuffer, JsValue> {
        let ops: Vec<Operation> = to_js(serde_wasm_bindgen::from_value(ops))?;
        image_to_js(self.run(image.as_core(), &ops))
    }
}

impl JsPipeline {
    pub(crate) fn with_config(config: PipelineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    fn core(&self) -> Pipeline<'_> {
        let mut pipeline = Pipeline::new(self.config);
        if let Some(font) = &self.font {
            pipeline = pipeline.with_rasterizer(font.as_core());
        }
        if let Some(frames) = &self.frames {
            pipeline = pipeline.with_catalog(frames.as_core());
        }
        pipeline
    }

    pub(crate) fn run(&self, src: &PixelBuffer, ops: &[Operation]) -> picfix_core::Result<PixelBuffer> {
        self.core().apply_all(src, ops)
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn image() -> JsPixelBuffer {
        JsPixelBuffer::new(8, 4, vec![120u8; 8 * 4 * 4]).unwrap()
    }

    fn object(json: &str) -> JsValue {
        js_sys::JSON::parse(json).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_apply_from_object() {
        let pipeline = JsPipeline::new(JsValue::UNDEFINED).unwrap();
        let out = pipeline
            .apply(&image(), object(r#"{"op":"crop","x":0,"y":0,"width":4,"height":2}"#))
            .unwrap();
        assert_eq!((out.width(), out.height()), (4, 2));
    }

    #[wasm_bindgen_test]
    fn test_apply_all_from_array() {
        let pipeline = JsPipeline::new(object(r#"{"resize_filter":"Nearest"}"#)).unwrap();
        let out = pipeline
            .apply_all(
                &image(),
                object(r#"[{"op":"resizeToFit","maxEdge":4},{"op":"flip","axis":"Vertical"}]"#),
            )
            .unwrap();
        assert_eq!((out.width(), out.height()), (4, 2));
    }

    #[wasm_bindgen_test]
    fn test_unknown_op_is_error() {
        let pipeline = JsPipeline::new(JsValue::NULL).unwrap();
        assert!(pipeline.apply(&image(), object(r#"{"op":"sharpen"}"#)).is_err());
    }

    #[wasm_bindgen_test]
    fn test_crop_error_propagates() {
        let pipeline = JsPipeline::export();
        let op = object(r#"{"op":"crop","x":6,"y":0,"width":4,"height":4}"#);
        assert!(pipeline.apply(&image(), op).is_err());
    }
}
