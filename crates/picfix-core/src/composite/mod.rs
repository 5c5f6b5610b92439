//! Compositing: overlays, text watermarks, frames and particle effects.
//!
//! Everything here reduces to the source-over blend in [`blend_pixel`].
//! Overlay rectangles and watermark origins must lie inside the base;
//! text and particles that spill past the edges are clipped.

mod blend;
mod frame;
mod particles;
mod watermark;

pub use blend::{blend_pixel, overlay, overlay_full_frame, Placement};
pub use frame::{frame_overlay, framed_jpeg, EncodedFrameCatalog, FrameCatalog, MemoryFrameCatalog};
pub use particles::{clamp_density, flea, snow, Particles};
pub use watermark::{
    underline_thickness, watermark, AbGlyphRasterizer, GlyphMask, TextRasterizer, Watermark,
};

pub(crate) use blend::overlay_full_frame_within;
pub(crate) use frame::frame_overlay_within;
pub(crate) use particles::particles_within;
pub(crate) use watermark::watermark_within;

#[cfg(test)]
pub(crate) use watermark::test_support;
