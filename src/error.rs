//! Error types for the derivative pipeline
//!
//! Fatal and per-target failures are distinguished at the call site: a
//! `Decode` error aborts the whole invocation, while `InvalidTarget`,
//! `Encode` and `Io` are recorded per target and the cascade continues.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The source file could not be opened or is not a supported,
    /// parseable image container. Fatal for the whole invocation.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A target with zero width or height. The target is skipped.
    #[error("invalid thumbnail target {width}x{height} for {dest}")]
    InvalidTarget {
        dest: PathBuf,
        width: u32,
        height: u32,
    },

    /// Encoding the resized buffer for one destination failed.
    #[error("failed to encode {dest}: {source}")]
    Encode {
        dest: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Writing one destination failed. The remaining targets are still
    /// attempted.
    #[error("i/o error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fingerprinting failed. Non-fatal: the cascade proceeds and the
    /// result carries no fingerprint.
    #[error("failed to fingerprint {path}: {message}")]
    Hash { path: PathBuf, message: String },

    /// A font file could not be read or parsed during registry
    /// installation.
    #[error("failed to load font {path}: {message}")]
    FontLoad { path: PathBuf, message: String },

    /// A watermark was requested but the font family is not registered.
    /// Fatal to the watermark step only; no substitute family is used.
    #[error("font family '{family}' is not installed")]
    FontMissing { family: String },
}

impl ProcessError {
    /// Whether this error aborts the whole invocation rather than a
    /// single target.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Decode { .. })
    }
}
