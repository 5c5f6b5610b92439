//! Pipeline configuration.
//!
//! Everything here is plain serde data with defaults, so a display layer can
//! pass a partial configuration object and have the rest filled in.

use serde::{Deserialize, Serialize};

use crate::transform::{FilterType, InterpolationFilter};

/// Default upper bound on output buffer size: 100 megapixels (400 MB of RGBA).
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

/// Memory guard applied to every allocated output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum `width * height` of any buffer the pipeline produces.
    pub max_pixels: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl Limits {
    /// Check whether a `width x height` buffer fits within the limit.
    pub fn allows(&self, width: u32, height: u32) -> bool {
        (width as u64) * (height as u64) <= self.max_pixels
    }
}

/// Settings for a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Output size guard.
    pub limits: Limits,
    /// Filter used by resize operations that don't name one.
    pub resize_filter: FilterType,
    /// Interpolation used by rotation.
    pub rotation_filter: InterpolationFilter,
}

impl PipelineConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration tuned for final export: Lanczos3 everywhere.
    pub fn export() -> Self {
        Self {
            resize_filter: FilterType::Lanczos3,
            rotation_filter: InterpolationFilter::Lanczos3,
            ..Self::default()
        }
    }
}
