//! Fingerprint cache file: one line holding the last computed fingerprint

use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{FingerprintError, FingerprintResult};

#[derive(Debug, Clone)]
pub struct FingerprintCache {
    path: PathBuf,
}

impl FingerprintCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Previous fingerprint, or `None` when the cache is absent or unreadable.
    pub fn load(&self) -> Option<String> {
        if !self.path.is_file() {
            return None;
        }
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Some(content.trim().to_string()).filter(|s| !s.is_empty()),
            Err(e) => {
                warn!(
                    "Ignoring unreadable fingerprint cache {}: {e}",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Overwrite the cache, creating parent directories as needed.
    pub fn save(&self, fingerprint: &str) -> FingerprintResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| FingerprintError::io(parent, e))?;
            }
        }
        std::fs::write(&self.path, format!("{fingerprint}\n"))
            .map_err(|e| FingerprintError::io(&self.path, e))
    }
}
