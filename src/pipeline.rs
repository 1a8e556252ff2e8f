//! Pipeline entry points
//!
//! One invocation is a synchronous, CPU-bound unit of work over one
//! exclusively-owned buffer. Independent invocations can run in
//! parallel; the only shared state is the read-only `FontRegistry`.

use crate::error::ProcessError;
use crate::fingerprint::{Digest, Fingerprinter};
use crate::fonts::FontRegistry;
use crate::image::cascade::{CascadeEngine, ProcessResult, ThumbTarget};
use crate::image::decoder::Decoder;
use crate::image::encode;
use crate::image::orientation::OrientationNormalizer;
use crate::image::resize::{ResizeMode, Resizer};
use crate::image::watermark::{WatermarkCompositor, WatermarkSpec};
use std::io::Write;
use std::path::Path;

/// Long-edge cap for download renditions.
pub const DOWNLOAD_MAX_EDGE: u32 = 1600;

pub struct ImagePipeline;

impl ImagePipeline {
    /// Decode a source image, fingerprint its oriented pixels, then run
    /// the thumbnail cascade over the caller-ordered targets.
    ///
    /// A decode failure is fatal and aborts before any target is
    /// attempted. Per-target failures are accumulated in the result so
    /// a partial cascade is still useful. Existing files at the target
    /// destinations are overwritten.
    pub fn generate_fingerprint_and_thumbnails(
        source: &Path,
        targets: &[ThumbTarget],
    ) -> Result<ProcessResult, ProcessError> {
        let decoded = Decoder::decode(source)?;
        let oriented = OrientationNormalizer::normalize(decoded.pixels, decoded.orientation);

        // Hash once, before any resize touches the buffer.
        let fingerprint = Fingerprinter::of_pixels(&oriented);
        tracing::debug!(path = %source.display(), fingerprint = %fingerprint, "hashed image");

        let outcome = CascadeEngine::run(oriented, targets);

        Ok(ProcessResult {
            fingerprint: Some(fingerprint),
            thumbs_written: outcome.thumbs_written,
            failures: outcome.failures,
        })
    }

    /// Standalone fingerprint path for sources whose stored digest is
    /// missing, without regenerating any thumbnails.
    pub fn fingerprint_file(source: &Path) -> Result<Digest, ProcessError> {
        let decoded = Decoder::decode(source)?;
        let oriented = OrientationNormalizer::normalize(decoded.pixels, decoded.orientation);
        Ok(Fingerprinter::of_pixels(&oriented))
    }

    /// Write a bounded-size, optionally watermarked rendition of the
    /// source to the sink, preserving the source's container format.
    ///
    /// The long edge is capped at `DOWNLOAD_MAX_EDGE`; smaller sources
    /// are not upscaled. A missing watermark font fails the call; the
    /// sink is not written in that case.
    pub fn render_download_transform(
        source: &Path,
        out: &mut impl Write,
        watermark: &WatermarkSpec,
        fonts: &FontRegistry,
    ) -> Result<(), ProcessError> {
        let decoded = Decoder::decode(source)?;
        let mut img = OrientationNormalizer::normalize(decoded.pixels, decoded.orientation);

        if img.width().max(img.height()) > DOWNLOAD_MAX_EDGE {
            img = Resizer::resize(
                img,
                DOWNLOAD_MAX_EDGE,
                DOWNLOAD_MAX_EDGE,
                ResizeMode::FitWithinBounds,
            );
        }

        WatermarkCompositor::apply(&mut img, watermark, fonts)?;

        let bytes = encode::encode(&img, decoded.format).map_err(|source_err| {
            ProcessError::Encode {
                dest: source.to_path_buf(),
                source: source_err,
            }
        })?;

        out.write_all(&bytes).map_err(|source_err| ProcessError::Io {
            path: source.to_path_buf(),
            source: source_err,
        })
    }
}
