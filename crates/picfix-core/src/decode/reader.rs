//! JPEG/PNG decoding into RGBA buffers with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodeError, ImageInfo};
use crate::buffer::PixelBuffer;
use crate::config::Limits;
use crate::transform::{orient_within, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is sniffed from the content; JPEG and PNG are supported.
///
/// # Errors
///
/// - `InvalidFormat` if the bytes aren't a recognized image
/// - `CorruptedFile` if the image is truncated or malformed
/// - `TooLarge` if the decoded image exceeds the default pixel limit
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    decode_within(bytes, &Limits::default())
}

pub(crate) fn decode_within(bytes: &[u8], limits: &Limits) -> Result<PixelBuffer, DecodeError> {
    let orientation = extract_orientation(bytes);
    let buffer = decode_raw(bytes, limits)?;
    if orientation != Orientation::Normal {
        log::debug!("applying EXIF orientation {:?}", orientation);
    }
    orient_within(&buffer, orientation, limits).map_err(|_| DecodeError::TooLarge {
        width: buffer.width(),
        height: buffer.height(),
    })
}

/// Decode an image without applying EXIF orientation.
///
/// Use this when orientation is handled separately or the stored pixel order
/// is wanted.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    decode_raw(bytes, &Limits::default())
}

/// Read dimensions and orientation from the header only.
pub fn read_info(bytes: &[u8]) -> Result<ImageInfo, DecodeError> {
    let (width, height) = open(bytes)?
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    Ok(ImageInfo {
        width,
        height,
        orientation: extract_orientation(bytes),
    })
}

/// Extract EXIF orientation value from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn open(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

fn decode_raw(bytes: &[u8], limits: &Limits) -> Result<PixelBuffer, DecodeError> {
    let img = open(bytes)?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let (width, height) = (img.width(), img.height());
    if !limits.allows(width, height) {
        return Err(DecodeError::TooLarge { width, height });
    }

    PixelBuffer::from_rgba_image_within(img.into_rgba8(), limits)
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}
