//! PicFix WASM - WebAssembly bindings for PicFix
//!
//! This crate exposes the picfix-core pixel pipeline to the JavaScript
//! editor. Images live on the WASM side as [`JsPixelBuffer`] handles; each
//! operation returns a new handle and leaves its input untouched.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for RGBA image data
//! - `decode` / `encode` - JPEG and PNG codecs
//! - `color` - Brightness, saturation, hue, shading, tint, black and white
//! - `convolve` - Blur and sketch
//! - `transform` - Rotate, flip, crop, resize, orientation
//! - `composite` - Overlays, watermarks, frames, snow and flea effects
//! - `pipeline` - Apply operation objects in sequence
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, brightness, rotate, encode_jpeg } from '@picfix/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const edited = rotate(brightness(image, 30), 90, false);
//! const jpeg = encode_jpeg(edited, 90);
//! ```

use wasm_bindgen::prelude::*;

mod color;
mod composite;
mod convolve;
mod decode;
mod encode;
mod logging;
mod pipeline;
mod transform;
mod types;

// Re-export public types
pub use color::{black_filter, brightness, hue, hue_matrix, saturation, shading, tint};
pub use composite::{
    flea, frame_overlay, framed_jpeg, overlay, overlay_full_frame, snow, watermark, JsFont,
    JsFrameCatalog,
};
pub use convolve::{blur, sketch};
pub use decode::{decode_image, decode_image_raw_orientation, image_orientation};
pub use encode::{encode_jpeg, encode_png};
pub use logging::set_log_level;
pub use pipeline::JsPipeline;
pub use transform::{apply_orientation, crop, flip, resize, resize_to_fit, rotate};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
