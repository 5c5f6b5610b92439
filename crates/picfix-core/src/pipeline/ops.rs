//! Operations as data.
//!
//! Each family has its own enum, tagged by an `op` field so a display layer
//! can describe an edit as a plain object:
//!
//! ```text
//! { "op": "brightness", "value": 40 }
//! { "op": "crop", "x": 10, "y": 10, "width": 200, "height": 150 }
//! { "op": "snow", "density": 0.5, "seed": 7 }
//! ```
//!
//! Operations that carry a whole [`PixelBuffer`] only exist on the Rust side
//! and are skipped by serde.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::composite::{Placement, Watermark};
use crate::convolve::SketchStyle;
use crate::transform::{FilterType, FlipAxis, Orientation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ColorOp {
    Brightness { value: i32 },
    Saturation { level: i32 },
    Hue { level: i32 },
    /// Packed `0xAARRGGBB` shading color.
    Shading { color: u32 },
    Tint { degree: i32 },
    BlackFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ConvolutionOp {
    Blur {
        radius: f32,
    },
    Sketch {
        #[serde(default)]
        style: SketchStyle,
        threshold: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum GeometryOp {
    Rotate {
        degrees: f64,
    },
    Flip {
        axis: FlipAxis,
    },
    Crop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    Resize {
        width: u32,
        height: u32,
        /// Falls back to the pipeline's configured filter.
        #[serde(default)]
        filter: Option<FilterType>,
    },
    #[serde(rename_all = "camelCase")]
    ResizeToFit {
        max_edge: u32,
    },
    Orient {
        orientation: Orientation,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum CompositeOp {
    #[serde(skip)]
    Overlay {
        overlay: PixelBuffer,
        placement: Placement,
    },
    #[serde(skip)]
    OverlayFullFrame { overlay: PixelBuffer },
    Watermark(Watermark),
    Frame {
        index: usize,
    },
    Snow {
        density: f32,
        #[serde(default)]
        seed: u64,
    },
    Flea {
        density: f32,
        #[serde(default)]
        seed: u64,
    },
}

/// Any pipeline operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operation {
    Color(ColorOp),
    Convolution(ConvolutionOp),
    Geometry(GeometryOp),
    Composite(CompositeOp),
}

impl Operation {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Color(op) => match op {
                ColorOp::Brightness { .. } => "brightness",
                ColorOp::Saturation { .. } => "saturation",
                ColorOp::Hue { .. } => "hue",
                ColorOp::Shading { .. } => "shading",
                ColorOp::Tint { .. } => "tint",
                ColorOp::BlackFilter => "blackFilter",
            },
            Operation::Convolution(op) => match op {
                ConvolutionOp::Blur { .. } => "blur",
                ConvolutionOp::Sketch { .. } => "sketch",
            },
            Operation::Geometry(op) => match op {
                GeometryOp::Rotate { .. } => "rotate",
                GeometryOp::Flip { .. } => "flip",
                GeometryOp::Crop { .. } => "crop",
                GeometryOp::Resize { .. } => "resize",
                GeometryOp::ResizeToFit { .. } => "resizeToFit",
                GeometryOp::Orient { .. } => "orient",
            },
            Operation::Composite(op) => match op {
                CompositeOp::Overlay { .. } => "overlay",
                CompositeOp::OverlayFullFrame { .. } => "overlayFullFrame",
                CompositeOp::Watermark(_) => "watermark",
                CompositeOp::Frame { .. } => "frame",
                CompositeOp::Snow { .. } => "snow",
                CompositeOp::Flea { .. } => "flea",
            },
        }
    }
}

impl From<ColorOp> for Operation {
    fn from(op: ColorOp) -> Self {
        Operation::Color(op)
    }
}

impl From<ConvolutionOp> for Operation {
    fn from(op: ConvolutionOp) -> Self {
        Operation::Convolution(op)
    }
}

impl From<GeometryOp> for Operation {
    fn from(op: GeometryOp) -> Self {
        Operation::Geometry(op)
    }
}

impl From<CompositeOp> for Operation {
    fn from(op: CompositeOp) -> Self {
        Operation::Composite(op)
    }
}
