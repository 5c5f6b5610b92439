//! The pipeline facade: dispatch an [`Operation`] to its transform family.
//!
//! A [`Pipeline`] holds only configuration and borrowed collaborators. It has
//! no state that changes between calls, so the same pipeline can be shared
//! freely and `apply` with the same input always gives the same output.
//!
//! # Example
//!
//! ```ignore
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let out = pipeline.apply_all(&image, &[
//!     ColorOp::Brightness { value: 20 }.into(),
//!     GeometryOp::Rotate { degrees: 90.0 }.into(),
//! ])?;
//! ```

mod family;
mod ops;

pub use family::{ColorAdjust, Compositor, Convolution, GeometricTransform};
pub use ops::{ColorOp, CompositeOp, ConvolutionOp, GeometryOp, Operation};

use crate::buffer::{check_dimensions, PixelBuffer};
use crate::composite::{FrameCatalog, TextRasterizer};
use crate::config::PipelineConfig;
use crate::error::Result;

/// A family of pixel operations sharing one parameter type.
pub trait PixelTransform {
    type Op;

    /// Produce a new buffer; `src` is never modified.
    fn apply(&self, src: &PixelBuffer, op: &Self::Op) -> Result<PixelBuffer>;
}

/// Stateless dispatcher over every transform family.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline<'a> {
    config: PipelineConfig,
    compositor: Compositor<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            compositor: Compositor {
                limits: config.limits,
                ..Compositor::default()
            },
        }
    }

    /// Use `rasterizer` for watermark operations.
    pub fn with_rasterizer(mut self, rasterizer: &'a dyn TextRasterizer) -> Self {
        self.compositor.rasterizer = Some(rasterizer);
        self
    }

    /// Use `catalog` for frame operations.
    pub fn with_catalog(mut self, catalog: &'a dyn FrameCatalog) -> Self {
        self.compositor.catalog = Some(catalog);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Apply each operation in order, feeding each output to the next.
    ///
    /// Stops at the first error; no partial result is returned.
    pub fn apply_all<'o, I>(&self, src: &PixelBuffer, ops: I) -> Result<PixelBuffer>
    where
        I: IntoIterator<Item = &'o Operation>,
    {
        let mut current = src.clone();
        for op in ops {
            current = self.apply(&current, op)?;
        }
        Ok(current)
    }
}

impl PixelTransform for Pipeline<'_> {
    type Op = Operation;

    fn apply(&self, src: &PixelBuffer, op: &Operation) -> Result<PixelBuffer> {
        let (w, h) = src.dimensions();
        log::debug!("{} on {}x{}", op.name(), w, h);
        check_dimensions(w, h, &self.config.limits)?;

        let result = match op {
            Operation::Color(op) => ColorAdjust.apply(src, op),
            Operation::Convolution(op) => Convolution.apply(src, op),
            Operation::Geometry(op) => GeometricTransform::new(self.config).apply(src, op),
            Operation::Composite(op) => self.compositor.apply(src, op),
        };

        result.map_err(|e| {
            log::warn!("{} rejected: {}", op.name(), e);
            e
        })
    }
}
