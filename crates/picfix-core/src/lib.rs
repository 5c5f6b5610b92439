//! PicFix Core - Image transformation library
//!
//! This crate provides the pixel pipeline behind the PicFix photo editor:
//! color adjustments, blur and sketch filters, geometric transforms, and
//! layered compositing (overlays, watermarks, frames, snow and flea effects)
//! over an in-memory RGBA [`PixelBuffer`].
//!
//! Every operation reads its source and returns a freshly allocated buffer.
//! Tone parameters are clamped into range; geometric parameters that don't fit
//! the buffer are rejected with a [`PicFixError`].
//!
//! Operations can be called directly from their modules, or described as
//! [`Operation`] values and run through a [`Pipeline`].

pub mod buffer;
pub mod color;
pub mod composite;
pub mod config;
pub mod convolve;
pub mod decode;
pub mod encode;
pub mod error;
pub mod luminance;
pub mod pipeline;
pub mod transform;

pub use buffer::{argb_from_rgba, rgba_from_argb, PixelBuffer, Rgba};
pub use color::{hue_matrix, ColorMatrix};
pub use composite::{
    AbGlyphRasterizer, EncodedFrameCatalog, FrameCatalog, GlyphMask, MemoryFrameCatalog,
    Placement, TextRasterizer, Watermark,
};
pub use config::{Limits, PipelineConfig};
pub use convolve::SketchStyle;
pub use decode::{decode_image, DecodeError};
pub use encode::{encode_jpeg, encode_png, EncodeError};
pub use error::{PicFixError, Result};
pub use pipeline::{
    ColorAdjust, ColorOp, CompositeOp, Compositor, Convolution, ConvolutionOp, GeometricTransform,
    GeometryOp, Operation, Pipeline, PixelTransform,
};
pub use transform::{FilterType, FlipAxis, InterpolationFilter, Orientation};
