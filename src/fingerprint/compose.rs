//! Build fingerprint composition
//!
//! Folds the schema segment, configuration file, renaming rules and template
//! tree (plus optional tool version and property overrides) into a single
//! fingerprint, then compares it with the cached value.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::cache::FingerprintCache;
use super::hasher::{hash_file, hash_str};
use super::schema::schema_fingerprint;
use super::templates::TemplateTreeDigest;
use crate::error::{FingerprintError, FingerprintResult, SchemaError};

/// Where the schema segment comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaInput {
    /// Dacpac path; fingerprinted from its contents
    Artifact(PathBuf),
    /// Opaque fingerprint computed elsewhere (live connection mode)
    Fingerprint(String),
}

#[derive(Debug, Clone)]
pub struct FingerprintInputs {
    pub schema: SchemaInput,
    pub config_file: Option<PathBuf>,
    pub renaming_file: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
    /// Generator version; a tool upgrade invalidates the cache
    pub tool_version: Option<String>,
    /// Configuration property overrides, folded in key order
    pub overrides: BTreeMap<String, String>,
}

impl FingerprintInputs {
    pub fn new(schema: SchemaInput) -> Self {
        Self {
            schema,
            config_file: None,
            renaming_file: None,
            template_dir: None,
            tool_version: None,
            overrides: BTreeMap::new(),
        }
    }
}

/// 16-character lowercase hex digest of all build inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-input segments, kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Segments {
    pub schema: String,
    pub config: String,
    pub renaming: String,
    pub templates: String,
    pub template_files: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FingerprintOutcome {
    pub fingerprint: Fingerprint,
    pub has_changed: bool,
    pub previous: Option<String>,
    pub segments: Segments,
}

/// Compute the fingerprint without touching the cache.
pub fn compose_fingerprint(inputs: &FingerprintInputs) -> FingerprintResult<(Fingerprint, Segments)> {
    let schema = schema_segment(&inputs.schema)?;
    let config = file_segment(inputs.config_file.as_deref())?;
    let renaming = file_segment(inputs.renaming_file.as_deref())?;
    let tree = match inputs.template_dir.as_deref() {
        Some(dir) => TemplateTreeDigest::collect(dir)?,
        None => TemplateTreeDigest::default(),
    };

    let mut combined = String::new();
    push_field(&mut combined, "schema", &schema);
    push_field(&mut combined, "config", &config);
    push_field(&mut combined, "renaming", &renaming);
    push_field(&mut combined, "templates", &tree.segment());
    if let Some(version) = inputs.tool_version.as_deref().filter(|v| !v.trim().is_empty()) {
        push_field(&mut combined, "tool", version.trim());
    }
    for (key, value) in &inputs.overrides {
        push_field(&mut combined, "override-key", key);
        push_field(&mut combined, "override-value", value);
    }

    let fingerprint = Fingerprint(hash_str(&combined).to_hex());
    let segments = Segments {
        schema,
        config,
        renaming,
        templates: if tree.is_empty() {
            String::new()
        } else {
            tree.hash().to_hex()
        },
        template_files: tree.len(),
    };
    Ok((fingerprint, segments))
}

/// Compute the fingerprint, compare with the cache, then refresh the cache.
pub fn compute_fingerprint(
    inputs: &FingerprintInputs,
    cache_file: &Path,
) -> FingerprintResult<FingerprintOutcome> {
    let (fingerprint, segments) = compose_fingerprint(inputs)?;

    let cache = FingerprintCache::new(cache_file);
    let previous = cache.load();
    let has_changed = previous.as_deref() != Some(fingerprint.as_str());

    if has_changed {
        info!(
            "Fingerprint changed ({} -> {fingerprint}); regeneration required",
            previous.as_deref().unwrap_or("none")
        );
    } else {
        info!("Fingerprint unchanged ({fingerprint}); generation can be skipped");
    }

    cache.save(fingerprint.as_str())?;

    Ok(FingerprintOutcome {
        fingerprint,
        has_changed,
        previous,
        segments,
    })
}

/// Appends `label:<byte length>:value\n`. The length prefix keeps values
/// containing newlines or separators from reading as other fields.
fn push_field(combined: &mut String, label: &str, value: &str) {
    combined.push_str(&format!("{label}:{}:{value}\n", value.len()));
}

fn schema_segment(input: &SchemaInput) -> FingerprintResult<String> {
    match input {
        SchemaInput::Fingerprint(value) => Ok(value.trim().to_string()),
        SchemaInput::Artifact(path) => match schema_fingerprint(path) {
            Ok(hash) => Ok(hash.to_hex()),
            Err(SchemaError::NotFound { path }) => {
                warn!(
                    "Schema artifact {} not found; fingerprinting without it",
                    path.display()
                );
                Ok(String::new())
            }
            Err(e) => Err(e.into()),
        },
    }
}

fn file_segment(path: Option<&Path>) -> FingerprintResult<String> {
    let Some(path) = path.filter(|p| p.is_file()) else {
        if let Some(path) = path {
            debug!("{} not found; contributing an empty segment", path.display());
        }
        return Ok(String::new());
    };
    let hash = hash_file(path).map_err(|e| FingerprintError::io(path, e))?;
    Ok(hash.to_hex())
}
