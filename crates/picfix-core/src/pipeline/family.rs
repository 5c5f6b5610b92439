//! One [`PixelTransform`] per transform family.

use super::ops::{ColorOp, CompositeOp, ConvolutionOp, GeometryOp};
use super::PixelTransform;
use crate::buffer::PixelBuffer;
use crate::color;
use crate::composite::{
    frame_overlay_within, overlay, overlay_full_frame_within, particles_within,
    watermark_within, FrameCatalog, Particles, TextRasterizer,
};
use crate::config::{Limits, PipelineConfig};
use crate::convolve;
use crate::error::{PicFixError, Result};
use crate::transform::{
    crop_within, flip, orient_within, resize_to_fit_within, resize_within, rotate_within,
};

/// Per-pixel tone and color adjustments. Never changes dimensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorAdjust;

impl PixelTransform for ColorAdjust {
    type Op = ColorOp;

    fn apply(&self, src: &PixelBuffer, op: &ColorOp) -> Result<PixelBuffer> {
        match *op {
            ColorOp::Brightness { value } => color::brightness(src, value),
            ColorOp::Saturation { level } => color::saturation(src, level),
            ColorOp::Hue { level } => color::hue(src, level),
            ColorOp::Shading { color } => color::shading(src, color),
            ColorOp::Tint { degree } => color::tint(src, degree),
            ColorOp::BlackFilter => color::black_filter(src),
        }
    }
}

/// Neighborhood filters. Never changes dimensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Convolution;

impl PixelTransform for Convolution {
    type Op = ConvolutionOp;

    fn apply(&self, src: &PixelBuffer, op: &ConvolutionOp) -> Result<PixelBuffer> {
        match *op {
            ConvolutionOp::Blur { radius } => convolve::blur(src, radius),
            ConvolutionOp::Sketch { style, threshold } => convolve::sketch(src, style, threshold),
        }
    }
}

/// Rotation, flip, crop, resize and orientation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricTransform {
    pub config: PipelineConfig,
}

impl GeometricTransform {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }
}

impl PixelTransform for GeometricTransform {
    type Op = GeometryOp;

    fn apply(&self, src: &PixelBuffer, op: &GeometryOp) -> Result<PixelBuffer> {
        let limits = &self.config.limits;
        match *op {
            GeometryOp::Rotate { degrees } => {
                rotate_within(src, degrees, self.config.rotation_filter, limits)
            }
            GeometryOp::Flip { axis } => flip(src, axis),
            GeometryOp::Crop {
                x,
                y,
                width,
                height,
            } => crop_within(src, x, y, width, height, limits),
            GeometryOp::Resize {
                width,
                height,
                filter,
            } => resize_within(
                src,
                width,
                height,
                filter.unwrap_or(self.config.resize_filter),
                limits,
            ),
            GeometryOp::ResizeToFit { max_edge } => {
                resize_to_fit_within(src, max_edge, self.config.resize_filter, limits)
            }
            GeometryOp::Orient { orientation } => orient_within(src, orientation, limits),
        }
    }
}

/// Layered compositing. Watermarks and frames need their collaborator.
#[derive(Clone, Copy, Default)]
pub struct Compositor<'a> {
    pub limits: Limits,
    pub rasterizer: Option<&'a dyn TextRasterizer>,
    pub catalog: Option<&'a dyn FrameCatalog>,
}

impl std::fmt::Debug for Compositor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("limits", &self.limits)
            .field("rasterizer", &self.rasterizer.is_some())
            .field("catalog", &self.catalog.map(|c| c.len()))
            .finish()
    }
}

impl PixelTransform for Compositor<'_> {
    type Op = CompositeOp;

    fn apply(&self, src: &PixelBuffer, op: &CompositeOp) -> Result<PixelBuffer> {
        match op {
            CompositeOp::Overlay {
                overlay: layer,
                placement,
            } => overlay(src, layer, *placement),
            CompositeOp::OverlayFullFrame { overlay: layer } => {
                overlay_full_frame_within(src, layer, &self.limits)
            }
            CompositeOp::Watermark(params) => {
                let rasterizer = self
                    .rasterizer
                    .ok_or(PicFixError::MissingCollaborator("text rasterizer"))?;
                watermark_within(src, params, rasterizer, &self.limits)
            }
            CompositeOp::Frame { index } => {
                let catalog = self
                    .catalog
                    .ok_or(PicFixError::MissingCollaborator("frame catalog"))?;
                frame_overlay_within(src, catalog, *index, &self.limits)
            }
            CompositeOp::Snow { density, seed } => {
                particles_within(src, Particles::Snow, *density, *seed, &self.limits)
            }
            CompositeOp::Flea { density, seed } => {
                particles_within(src, Particles::Flea, *density, *seed, &self.limits)
            }
        }
    }
}
