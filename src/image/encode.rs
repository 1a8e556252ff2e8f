//! Derivative encoding
//!
//! One fixed quality setting for lossy output keeps the cascade
//! deterministic: identical inputs and targets produce byte-identical
//! files.

use crate::error::ProcessError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Fixed encoder quality for lossy formats.
pub const JPEG_QUALITY: u8 = 90;

/// Encode a buffer into container bytes for the given format.
///
/// JPEG has no alpha channel, so the buffer is flattened to RGB first;
/// other supported formats are written as RGBA.
pub fn encode(img: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Cursor::new(Vec::new());

    match format {
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(img.clone()).into_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
            rgb.write_with_encoder(encoder)?;
        }
        _ => img.write_to(&mut buf, format)?,
    }

    Ok(buf.into_inner())
}

/// Encode a buffer and write it to `dest`, creating or overwriting the
/// file. The output format follows the destination's extension.
pub fn write_file(img: &RgbaImage, dest: &Path) -> Result<(), ProcessError> {
    let format = ImageFormat::from_path(dest).map_err(|source| ProcessError::Encode {
        dest: dest.to_path_buf(),
        source,
    })?;

    let bytes = encode(img, format).map_err(|source| ProcessError::Encode {
        dest: dest.to_path_buf(),
        source,
    })?;

    std::fs::write(dest, bytes).map_err(|source| ProcessError::Io {
        path: dest.to_path_buf(),
        source,
    })
}
