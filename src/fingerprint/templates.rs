//! Template tree digest
//!
//! Every file under the template directory contributes its relative path
//! (always `/`-separated) and content hash. Entries are sorted by path so
//! the digest does not depend on directory enumeration order.

use std::path::Path;
use walkdir::WalkDir;

use super::hasher::{ContentHash, hash_file, hash_str};
use crate::error::{FingerprintError, FingerprintResult};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateEntry {
    pub relative_path: String,
    pub hash: ContentHash,
}

/// Ordered (relative path, content hash) pairs for a template tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateTreeDigest {
    pub entries: Vec<TemplateEntry>,
}

impl TemplateTreeDigest {
    /// Walk `root` and hash every file. A missing root yields an empty digest.
    pub fn collect(root: &Path) -> FingerprintResult<Self> {
        if !root.is_dir() {
            return Ok(Self::default());
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .replace('\\', "/");
            let hash =
                hash_file(entry.path()).map_err(|e| FingerprintError::io(entry.path(), e))?;
            entries.push(TemplateEntry {
                relative_path: relative,
                hash,
            });
        }

        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(Self { entries })
    }

    /// Canonical text form: one `path\0hash` line per file.
    pub fn segment(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}\0{}\n", e.relative_path, e.hash))
            .collect()
    }

    /// The whole tree folded into one hash.
    pub fn hash(&self) -> ContentHash {
        hash_str(&self.segment())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
