//! Image encoding for export.
//!
//! JPEG export flattens alpha over black, since the format has no alpha
//! channel. PNG export is lossless and keeps alpha.
//!
//! # Examples
//!
//! ```ignore
//! use picfix_core::encode::encode_jpeg;
//!
//! let image = PixelBuffer::filled(100, 100, [128, 128, 128, 255])?;
//! let jpeg_bytes = encode_jpeg(&image, 90)?;
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

use thiserror::Error;

mod jpeg;
mod png;

pub use jpeg::{encode_jpeg, flatten_alpha, FRAME_EXPORT_QUALITY};
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    JpegFailed(String),

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    PngFailed(String),
}
