//! Lumina image derivative pipeline
//!
//! Turns a decoded photograph into its derived artifacts,
//! deterministically:
//!
//! - a pixel-content fingerprint that ignores embedded metadata, so
//!   byte-identical images deduplicate even when their tags differ;
//! - a cascade of thumbnails at caller-ordered target sizes, each
//!   resized from the previous output rather than the original;
//! - a bounded "download" rendition with an optional size-proportional
//!   watermark.
//!
//! Persistence, duplicate-detection policy, and transport are external
//! collaborators: they hand in source paths and target specs and
//! consume the fingerprint and per-target outcomes returned here.
//!
//! Every invocation is synchronous and owns its pixel buffer for its
//! whole lifetime. Run invocations in parallel freely; the only shared
//! state is a [`FontRegistry`] built once at setup and read-only
//! afterwards.

pub mod error;
pub mod fingerprint;
pub mod fonts;
pub mod image;
pub mod pipeline;

pub use error::ProcessError;
pub use fingerprint::{Digest, Fingerprinter};
pub use fonts::{FontRegistry, WATERMARK_FAMILY};
pub use image::{
    DecodedImage, Decoder, OrientationNormalizer, ProcessResult, ResizeMode, Resizer,
    TargetFailure, ThumbTarget, WatermarkCompositor, WatermarkLayout, WatermarkSpec,
    SUPPORTED_EXTENSIONS,
};
pub use pipeline::{ImagePipeline, DOWNLOAD_MAX_EDGE};
