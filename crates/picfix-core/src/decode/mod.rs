//! Image decoding for frame catalogs and host applications.
//!
//! Decoding sniffs the container format (JPEG or PNG), converts to RGBA8 and
//! applies the EXIF orientation so callers always receive upright pixels.
//!
//! # Examples
//!
//! ```ignore
//! use picfix_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let image = decode_image(&bytes)?;
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, get_orientation, read_info};
pub use types::{DecodeError, ImageInfo};

pub(crate) use reader::decode_within;
