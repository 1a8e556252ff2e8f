//! Source decoding
//!
//! Turns a source file's bytes into an owned RGBA8 pixel buffer plus
//! the detected container format and the EXIF orientation tag. The file
//! is read once; format sniffing and EXIF parsing both work over the
//! same in-memory bytes.

use crate::error::ProcessError;
use image::{ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Source file extensions the decoder accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// A decoded source image: upright-or-not pixels plus the metadata the
/// pipeline needs to make it upright.
pub struct DecodedImage {
    pub pixels: RgbaImage,
    pub format: ImageFormat,
    /// EXIF orientation value, 1-8. 1 means no transform needed.
    pub orientation: u32,
}

pub struct Decoder;

impl Decoder {
    /// Whether a path carries one of the supported extensions.
    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|s| e.eq_ignore_ascii_case(s))
            })
            .unwrap_or(false)
    }

    /// Decode a source file. Fails with `Decode` when the file cannot
    /// be opened or the bytes are not a parseable image container.
    pub fn decode(path: &Path) -> Result<DecodedImage, ProcessError> {
        let data = std::fs::read(path).map_err(|source| ProcessError::Decode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(source),
        })?;

        let reader = ImageReader::new(Cursor::new(&data))
            .with_guessed_format()
            .map_err(|source| ProcessError::Decode {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(source),
            })?;

        let format = reader.format().ok_or_else(|| ProcessError::Decode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "unrecognized image container",
            )),
        })?;

        let pixels = reader
            .decode()
            .map_err(|source| ProcessError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        let orientation = Self::read_exif_orientation(&data);

        tracing::debug!(
            path = %path.display(),
            format = ?format,
            width = pixels.width(),
            height = pixels.height(),
            orientation = orientation,
            "decoded source image"
        );

        Ok(DecodedImage {
            pixels,
            format,
            orientation,
        })
    }

    /// Read the EXIF orientation tag from raw container bytes.
    ///
    /// Returns 1 (normal) when the container carries no EXIF data, the
    /// EXIF is unparseable, or the tag is absent. Only the orientation
    /// tag is consumed; no other metadata is extracted.
    pub fn read_exif_orientation(data: &[u8]) -> u32 {
        let mut cursor = std::io::BufReader::new(Cursor::new(data));
        let Ok(exif) = exif::Reader::new().read_from_container(&mut cursor) else {
            return 1;
        };

        exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1)
    }
}
