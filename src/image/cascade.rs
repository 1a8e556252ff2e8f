//! Progressive resize cascade
//!
//! Each target is resized from the previous target's output rather
//! than from the original. Resizing a large source once per target
//! costs a full-resolution pass every time; reusing the progressively
//! smaller intermediate is far cheaper for long cascades, at the price
//! of extra interpolation passes.
//!
//! Caller contract: order targets from the largest bounding box to the
//! smallest. The engine does not re-sort. If a later target is larger
//! than an earlier one it will be upscaled from the smaller
//! intermediate and come out measurably softer than a resize from the
//! source. That asymmetry is documented behavior, not corrected here.

use crate::error::ProcessError;
use crate::fingerprint::Digest;
use crate::image::encode;
use crate::image::resize::{ResizeMode, Resizer};
use image::RgbaImage;
use std::path::PathBuf;

/// One thumbnail destination in the cascade.
#[derive(Debug, Clone)]
pub struct ThumbTarget {
    pub dest: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Fill the box and crop overflow so the output dimensions equal
    /// the target exactly. Used for the smallest thumbnails.
    pub crop_to_ratio: bool,
}

impl ThumbTarget {
    pub fn new(dest: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            dest: dest.into(),
            width,
            height,
            crop_to_ratio: false,
        }
    }

    pub fn cropped(dest: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            dest: dest.into(),
            width,
            height,
            crop_to_ratio: true,
        }
    }

    fn mode(&self) -> ResizeMode {
        if self.crop_to_ratio {
            ResizeMode::CropToExactBox
        } else {
            ResizeMode::FitWithinBounds
        }
    }
}

/// A per-target failure, recorded without aborting the cascade.
#[derive(Debug)]
pub struct TargetFailure {
    pub dest: PathBuf,
    pub error: ProcessError,
}

/// Outcome of one whole-image invocation.
#[derive(Debug, Default)]
pub struct ProcessResult {
    /// Pixel-content digest, or `None` when fingerprinting failed.
    /// Absence is non-fatal; thumbnails may still have been written.
    pub fingerprint: Option<Digest>,
    /// Whether at least one thumbnail was written.
    pub thumbs_written: bool,
    pub failures: Vec<TargetFailure>,
}

pub struct CascadeEngine;

/// What the cascade did: whether anything was written, and which
/// targets failed.
#[derive(Debug)]
pub struct CascadeOutcome {
    pub thumbs_written: bool,
    pub failures: Vec<TargetFailure>,
}

impl CascadeEngine {
    /// Run the cascade over an oriented buffer, consuming it.
    ///
    /// A zero-dimension target or a failed encode/write is recorded and
    /// the remaining targets are still attempted; an invalid target
    /// leaves the working buffer untouched for the next one.
    pub fn run(mut img: RgbaImage, targets: &[ThumbTarget]) -> CascadeOutcome {
        let mut failures = Vec::new();
        let mut thumbs_written = false;

        for target in targets {
            if target.width == 0 || target.height == 0 {
                tracing::warn!(
                    dest = %target.dest.display(),
                    width = target.width,
                    height = target.height,
                    "skipping invalid thumbnail target"
                );
                failures.push(TargetFailure {
                    dest: target.dest.clone(),
                    error: ProcessError::InvalidTarget {
                        dest: target.dest.clone(),
                        width: target.width,
                        height: target.height,
                    },
                });
                continue;
            }

            tracing::trace!(
                dest = %target.dest.display(),
                width = target.width,
                height = target.height,
                crop = target.crop_to_ratio,
                "generating thumbnail"
            );

            // The working buffer is the previous target's output, not
            // the original.
            img = Resizer::resize(img, target.width, target.height, target.mode());

            match encode::write_file(&img, &target.dest) {
                Ok(()) => thumbs_written = true,
                Err(error) => {
                    tracing::warn!(dest = %target.dest.display(), error = %error, "thumbnail failed");
                    failures.push(TargetFailure {
                        dest: target.dest.clone(),
                        error,
                    });
                }
            }
        }

        CascadeOutcome {
            thumbs_written,
            failures,
        }
    }
}
