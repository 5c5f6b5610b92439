//! Decorative frames from an indexed catalog.

use super::blend::overlay_full_frame_within;
use crate::buffer::PixelBuffer;
use crate::config::Limits;
use crate::decode::{decode_within, DecodeError};
use crate::encode::{encode_jpeg, FRAME_EXPORT_QUALITY};
use crate::error::{PicFixError, Result};

/// Indexed source of frame images.
pub trait FrameCatalog {
    /// Number of frames; valid indices are `0..len()`.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produce the frame at `index`. Called only with `index < len()`.
    fn frame(&self, index: usize) -> std::result::Result<PixelBuffer, DecodeError>;
}

/// Catalog of already-decoded frames.
#[derive(Debug, Clone, Default)]
pub struct MemoryFrameCatalog {
    frames: Vec<PixelBuffer>,
}

impl MemoryFrameCatalog {
    pub fn new(frames: Vec<PixelBuffer>) -> Self {
        Self { frames }
    }

    pub fn push(&mut self, frame: PixelBuffer) {
        self.frames.push(frame);
    }
}

impl FromIterator<PixelBuffer> for MemoryFrameCatalog {
    fn from_iter<I: IntoIterator<Item = PixelBuffer>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FrameCatalog for MemoryFrameCatalog {
    fn len(&self) -> usize {
        self.frames.len()
    }

    fn frame(&self, index: usize) -> std::result::Result<PixelBuffer, DecodeError> {
        self.frames
            .get(index)
            .cloned()
            .ok_or_else(|| DecodeError::Unavailable(format!("frame {}", index)))
    }
}

/// Catalog of encoded (PNG/JPEG) frames, decoded on each lookup.
#[derive(Debug, Clone, Default)]
pub struct EncodedFrameCatalog {
    frames: Vec<Vec<u8>>,
    limits: Limits,
}

impl EncodedFrameCatalog {
    pub fn new(frames: Vec<Vec<u8>>) -> Self {
        Self {
            frames,
            limits: Limits::default(),
        }
    }

    /// Use `limits` when decoding frames.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn push(&mut self, bytes: Vec<u8>) {
        self.frames.push(bytes);
    }
}

impl FrameCatalog for EncodedFrameCatalog {
    fn len(&self) -> usize {
        self.frames.len()
    }

    fn frame(&self, index: usize) -> std::result::Result<PixelBuffer, DecodeError> {
        let bytes = self
            .frames
            .get(index)
            .ok_or_else(|| DecodeError::Unavailable(format!("frame {}", index)))?;
        decode_within(bytes, &self.limits)
    }
}

/// Scale frame `index` to the base's dimensions and composite it on top.
///
/// # Errors
///
/// - `IndexOutOfRange` if `index >= catalog.len()`
/// - `Decode` if the catalog can't produce the frame
pub fn frame_overlay(
    base: &PixelBuffer,
    catalog: &dyn FrameCatalog,
    index: usize,
) -> Result<PixelBuffer> {
    frame_overlay_within(base, catalog, index, &Limits::default())
}

pub(crate) fn frame_overlay_within(
    base: &PixelBuffer,
    catalog: &dyn FrameCatalog,
    index: usize,
    limits: &Limits,
) -> Result<PixelBuffer> {
    let len = catalog.len();
    if index >= len {
        log::warn!("frame index {} out of range for {} frames", index, len);
        return Err(PicFixError::IndexOutOfRange { index, len });
    }
    let frame = catalog.frame(index)?;
    overlay_full_frame_within(base, &frame, limits)
}

/// Composite a frame and export the result as a full-quality JPEG.
pub fn framed_jpeg(base: &PixelBuffer, catalog: &dyn FrameCatalog, index: usize) -> Result<Vec<u8>> {
    let framed = frame_overlay(base, catalog, index)?;
    Ok(encode_jpeg(&framed, FRAME_EXPORT_QUALITY)?)
}
