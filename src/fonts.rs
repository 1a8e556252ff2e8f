//! Font registry for watermark rendering
//!
//! The registry is built once during process setup and then passed by
//! shared reference into watermark calls. It is immutable after build,
//! so concurrent invocations can read it without synchronization; the
//! single-writer requirement is satisfied by construction rather than
//! by a lock.

use crate::error::ProcessError;
use ab_glyph::FontVec;
use std::collections::HashMap;
use std::path::Path;

/// Well-known family name the watermark compositor looks up.
pub const WATERMARK_FAMILY: &str = "arial";

/// Installed font families, keyed by lowercased family name.
#[derive(Default)]
pub struct FontRegistry {
    families: HashMap<String, FontVec>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single font file under the given family name.
    pub fn install_file(&mut self, path: &Path, family: &str) -> Result<(), ProcessError> {
        let data = std::fs::read(path).map_err(|source| ProcessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|e| ProcessError::FontLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::info!(path = %path.display(), family = family, "watermark font installed");
        self.families.insert(family.to_ascii_lowercase(), font);
        Ok(())
    }

    /// Load every `.ttf`/`.otf` file in a directory, registering each
    /// under its lowercased file stem. Unparseable entries are skipped
    /// with a warning so one bad file does not block setup.
    pub fn install_dir(&mut self, dir: &Path) -> Result<(), ProcessError> {
        let entries = std::fs::read_dir(dir).map_err(|source| ProcessError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
                .unwrap_or(false);
            if !is_font {
                continue;
            }

            let family = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_ascii_lowercase(),
                None => continue,
            };

            if let Err(e) = self.install_file(&path, &family) {
                tracing::warn!(path = %path.display(), error = %e, "skipping font file");
            }
        }

        Ok(())
    }

    pub fn get(&self, family: &str) -> Option<&FontVec> {
        self.families.get(&family.to_ascii_lowercase())
    }

    /// Look up a family, surfacing the watermark-fatal error when it is
    /// absent. The compositor never substitutes a different family.
    pub fn require(&self, family: &str) -> Result<&FontVec, ProcessError> {
        self.get(family).ok_or_else(|| ProcessError::FontMissing {
            family: family.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
