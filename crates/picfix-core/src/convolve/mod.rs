//! Neighborhood operations: Gaussian blur and sketch.
//!
//! Both sample the full source buffer with clamp-to-edge addressing and write
//! rows independently, so row-parallel execution gives the same output as a
//! sequential run.

mod blur;
mod sketch;

pub use blur::{blur, clamp_radius, MAX_BLUR_RADIUS, MIN_BLUR_RADIUS};
pub use sketch::{clamp_threshold, sketch, SketchStyle};
