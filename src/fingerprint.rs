//! Content fingerprinting
//!
//! Hashes raw pixel data only, so two byte-identical images produce the
//! same digest even when their embedded metadata differs. The hash is
//! taken after orientation normalization and before any resize: it is
//! invariant to metadata edits and re-encoding quality, but sensitive to
//! actual visual content (a rotated duplicate hashes differently until
//! both copies are normalized).

use image::RgbaImage;
use sha2::{Digest as _, Sha256};
use std::fmt;

/// Fixed-length pixel-content digest. Equality is byte-wise.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering, the form handed to the persistence
    /// collaborator.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

pub struct Fingerprinter;

impl Fingerprinter {
    /// Compute the content digest of an oriented pixel buffer.
    ///
    /// Rows are streamed top to bottom into an incremental hash state,
    /// each row left to right with all four channels per pixel, so peak
    /// memory stays bounded for very large images.
    pub fn of_pixels(img: &RgbaImage) -> Digest {
        let mut hasher = Sha256::new();

        let row_bytes = img.width() as usize * 4;
        for row in img.as_raw().chunks_exact(row_bytes) {
            hasher.update(row);
        }

        Digest(hasher.finalize().into())
    }
}
