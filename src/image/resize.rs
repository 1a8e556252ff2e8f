//! Resize operations
//!
//! Two modes cover every thumbnail target: `FitWithinBounds` preserves
//! the aspect ratio and keeps the result inside the target box, while
//! `CropToExactBox` fills the box and center-crops the overflow so the
//! output dimensions equal the target exactly.

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Preserve aspect ratio; result no larger than the box in either
    /// dimension.
    FitWithinBounds,
    /// Resize to fill the box and crop overflow; output dimensions
    /// equal the box exactly.
    CropToExactBox,
}

pub struct Resizer;

impl Resizer {
    /// Pick an interpolation filter from the shrink ratio. Heavy
    /// downscales tolerate a cheaper filter; near-1:1 resizes get the
    /// sharper, more expensive one.
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width.max(1) as f32;
        let height_ratio = orig_height as f32 / new_height.max(1) as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Resize a buffer for a target box, consuming the input and
    /// returning the new buffer.
    pub fn resize(img: RgbaImage, width: u32, height: u32, mode: ResizeMode) -> RgbaImage {
        let (orig_width, orig_height) = img.dimensions();
        let filter = Self::select_filter(orig_width, orig_height, width, height);

        let dynamic = DynamicImage::ImageRgba8(img);
        let resized = match mode {
            ResizeMode::FitWithinBounds => dynamic.resize(width, height, filter),
            ResizeMode::CropToExactBox => dynamic.resize_to_fill(width, height, filter),
        };
        resized.into_rgba8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn canvas(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
    }

    #[test]
    fn fit_preserves_aspect_ratio_within_box() {
        let resized = Resizer::resize(canvas(1600, 1200), 800, 800, ResizeMode::FitWithinBounds);
        assert_eq!(resized.dimensions(), (800, 600));
    }

    #[test]
    fn fit_never_exceeds_either_bound() {
        let resized = Resizer::resize(canvas(1200, 1600), 400, 400, ResizeMode::FitWithinBounds);
        assert_eq!(resized.dimensions(), (300, 400));
    }

    #[test]
    fn crop_yields_exact_box_dimensions() {
        let resized = Resizer::resize(canvas(1600, 1200), 150, 100, ResizeMode::CropToExactBox);
        assert_eq!(resized.dimensions(), (150, 100));
    }

    #[test]
    fn crop_exact_box_on_mismatched_ratio() {
        // 4:3 source into a square box still comes out square.
        let resized = Resizer::resize(canvas(1600, 1200), 150, 150, ResizeMode::CropToExactBox);
        assert_eq!(resized.dimensions(), (150, 150));
    }

    #[test]
    fn filter_selection_follows_shrink_ratio() {
        // > 2x shrink
        assert_eq!(
            Resizer::select_filter(1600, 1200, 400, 300),
            FilterType::Triangle
        );
        // between 1.5x and 2x
        assert_eq!(
            Resizer::select_filter(1600, 1200, 900, 675),
            FilterType::CatmullRom
        );
        // near 1:1 (and upscales)
        assert_eq!(
            Resizer::select_filter(1600, 1200, 1500, 1125),
            FilterType::Lanczos3
        );
        assert_eq!(
            Resizer::select_filter(400, 300, 800, 600),
            FilterType::Lanczos3
        );
    }
}
