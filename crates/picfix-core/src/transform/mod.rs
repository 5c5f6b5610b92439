//! Geometric transforms: rotation, flip, crop, resize and EXIF orientation.
//!
//! # Coordinate System
//!
//! - Origin is the top-left pixel
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Crop rectangles are in whole pixels
//!
//! Transforms that change dimensions allocate through the crate's size guard
//! and return `Result`; flip keeps the dimensions and cannot fail.

mod crop;
mod flip;
mod orientation;
mod resize;
mod rotation;

pub use crop::crop;
pub use flip::{flip, FlipAxis};
pub use orientation::{apply_orientation, Orientation};
pub use resize::{resize, resize_to_fit, FilterType};
pub use rotation::{apply_rotation, compute_rotated_bounds, InterpolationFilter, ROTATION_BACKGROUND};

pub(crate) use crop::crop_within;
pub(crate) use orientation::orient_within;
pub(crate) use resize::{resize_to_fit_within, resize_within};
pub(crate) use rotation::rotate_within;
