//! Watermark text compositing
//!
//! Draws size-proportional text into the bottom-right corner of a
//! bounded-resized buffer. Landscape images get a smaller width
//! fraction than portrait ones because the horizontal canvas is wider.

use crate::error::ProcessError;
use crate::fonts::{FontRegistry, WATERMARK_FAMILY};
use ab_glyph::PxScale;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

/// Font size the text is measured at before scaling.
pub const REFERENCE_FONT_SIZE: f32 = 10.0;

/// Caller-supplied watermark request. Empty or absent text makes the
/// compositor a no-op.
#[derive(Debug, Clone)]
pub struct WatermarkSpec {
    pub text: Option<String>,
    pub color: Rgba<u8>,
}

impl WatermarkSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            color: Rgba([255, 255, 255, 255]),
        }
    }

    pub fn none() -> Self {
        Self {
            text: None,
            color: Rgba([255, 255, 255, 255]),
        }
    }
}

/// Scaled font and anchor geometry for one canvas. Pure arithmetic,
/// separated from drawing so it can be verified without font data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkLayout {
    /// Multiplier applied to the reference-size text measurement.
    pub scale: f32,
    /// Reference size times `scale`.
    pub font_size: f32,
    /// Distance of the anchor from the right and bottom edges.
    pub margin: f32,
}

impl WatermarkLayout {
    /// Width fraction for the rendered text: 1/6 of the canvas width in
    /// landscape, 1/4 in portrait.
    pub fn width_fraction(img_width: u32, img_height: u32) -> f32 {
        if img_width >= img_height {
            1.0 / 6.0
        } else {
            1.0 / 4.0
        }
    }

    /// Compute the layout from the canvas dimensions and the text width
    /// measured at `REFERENCE_FONT_SIZE`.
    pub fn compute(img_width: u32, img_height: u32, measured_width: f32) -> Self {
        let text_box_width = img_width as f32 * Self::width_fraction(img_width, img_height);
        let scale = text_box_width / measured_width;

        Self {
            scale,
            font_size: REFERENCE_FONT_SIZE * scale,
            // 5% of the text-box width.
            margin: text_box_width / 20.0,
        }
    }
}

pub struct WatermarkCompositor;

impl WatermarkCompositor {
    /// Draw the watermark text onto the buffer, right- and
    /// bottom-aligned at the computed anchor.
    ///
    /// Fails with `FontMissing` when the well-known family is not
    /// registered; no substitute family is ever used.
    pub fn apply(
        img: &mut RgbaImage,
        spec: &WatermarkSpec,
        fonts: &FontRegistry,
    ) -> Result<(), ProcessError> {
        let Some(text) = spec.text.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(());
        };

        let font = fonts.require(WATERMARK_FAMILY)?;

        let (measured_width, _) = text_size(PxScale::from(REFERENCE_FONT_SIZE), font, text);
        if measured_width == 0 {
            return Ok(());
        }

        let layout = WatermarkLayout::compute(img.width(), img.height(), measured_width as f32);
        let scale = PxScale::from(layout.font_size);

        // Convert the right/bottom-aligned anchor into the top-left
        // draw position.
        let (text_width, text_height) = text_size(scale, font, text);
        let x = img.width() as f32 - layout.margin - text_width as f32;
        let y = img.height() as f32 - layout.margin - text_height as f32;

        tracing::debug!(
            text = text,
            font_size = layout.font_size,
            x = x,
            y = y,
            "applying watermark"
        );

        draw_text_mut(
            img,
            spec.color,
            x.max(0.0) as i32,
            y.max(0.0) as i32,
            scale,
            font,
            text,
        );

        Ok(())
    }
}
