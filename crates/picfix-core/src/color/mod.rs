//! Per-pixel color-space operations.
//!
//! - **Brightness**: additive RGB shift
//! - **Saturation**: interpolation toward/away from luma
//! - **Hue**: rotation around the luma axis, also available as a reusable
//!   [`ColorMatrix`] descriptor for display surfaces
//! - **Shading**: channel multiply by a packed ARGB color
//! - **Tint**: chroma rotation by a degree
//! - **Black filter**: BT.709 grayscale
//!
//! None of these change buffer dimensions, and all parameters are clamped.

mod adjust;
mod matrix;

pub use adjust::{black_filter, brightness, hue, saturation, shading, tint, BRIGHTNESS_LIMIT};
pub use matrix::{ColorMatrix, HUE_LIMIT, SATURATION_LIMIT};

/// Build the hue-rotation descriptor for `level` degrees.
///
/// The descriptor is independent of any buffer; apply it with
/// [`ColorMatrix::apply_to_pixel`] or hand [`ColorMatrix::as_array`] to a
/// renderer.
pub fn hue_matrix(level: i32) -> ColorMatrix {
    ColorMatrix::hue(level)
}
