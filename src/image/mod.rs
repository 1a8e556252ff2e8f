//! Image pipeline stages
//!
//! Each stage takes and returns one owned buffer (or mutates one in
//! place), so ownership and failure boundaries are explicit:
//! decode -> orient -> resize -> draw.

pub mod cascade;
pub mod decoder;
pub mod encode;
pub mod orientation;
pub mod resize;
pub mod watermark;

pub use cascade::{CascadeEngine, CascadeOutcome, ProcessResult, TargetFailure, ThumbTarget};
pub use decoder::{DecodedImage, Decoder, SUPPORTED_EXTENSIONS};
pub use orientation::OrientationNormalizer;
pub use resize::{ResizeMode, Resizer};
pub use watermark::{WatermarkCompositor, WatermarkLayout, WatermarkSpec};
