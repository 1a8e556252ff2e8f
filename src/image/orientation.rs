//! EXIF orientation normalization
//!
//! Physically rotates/flips the pixel buffer to upright so the
//! orientation tag never needs to be reapplied downstream. Values
//! outside 1-8 are treated as 1 (no transform).

use image::{imageops, RgbaImage};

pub struct OrientationNormalizer;

impl OrientationNormalizer {
    /// Rotation and flip operations for a given EXIF orientation value.
    /// Returns (rotate_angle_cw, flip_horizontal, flip_vertical).
    pub fn transforms_for(orientation: u32) -> (Option<u16>, bool, bool) {
        match orientation {
            1 => (None, false, false),      // Normal
            2 => (None, true, false),       // Mirror horizontal
            3 => (Some(180), false, false), // Rotate 180
            4 => (None, false, true),       // Mirror vertical
            5 => (Some(90), true, false),   // Transpose: rotate 90 CW, then mirror
            6 => (Some(90), false, false),  // Rotate 90 CW
            7 => (Some(270), true, false),  // Transverse: rotate 270 CW, then mirror
            8 => (Some(270), false, false), // Rotate 270 CW
            _ => (None, false, false),      // Unsupported, treat as normal
        }
    }

    /// Bake the orientation transform into the buffer, making it upright.
    pub fn normalize(img: RgbaImage, orientation: u32) -> RgbaImage {
        let (rotate, flip_h, flip_v) = Self::transforms_for(orientation);

        if rotate.is_none() && !flip_h && !flip_v {
            return img;
        }

        tracing::debug!(
            orientation = orientation,
            rotate = ?rotate,
            flip_horizontal = flip_h,
            flip_vertical = flip_v,
            "normalizing orientation"
        );

        let mut img = match rotate {
            Some(90) => imageops::rotate90(&img),
            Some(180) => imageops::rotate180(&img),
            Some(270) => imageops::rotate270(&img),
            _ => img,
        };

        if flip_h {
            imageops::flip_horizontal_in_place(&mut img);
        }
        if flip_v {
            imageops::flip_vertical_in_place(&mut img);
        }

        img
    }
}
