//! Schema artifact (dacpac) fingerprinting
//!
//! A dacpac is a zip with a `model.xml` schema document and optional
//! `predeploy.sql` / `postdeploy.sql` scripts. The model embeds the absolute
//! path of the machine that built it, so those metadata values are reduced to
//! their file name before hashing. Identical schemas built under different
//! roots then fingerprint identically.

use regex::{Captures, Regex};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;
use xxhash_rust::xxh64::Xxh64;
use zip::ZipArchive;
use zip::result::ZipError;

use super::hasher::ContentHash;
use super::sql::normalize_sql;
use crate::error::{SchemaError, SchemaResult};
use crate::resolve::predicates::file_name_of;

pub const MODEL_ENTRY: &str = "model.xml";
pub const PREDEPLOY_ENTRY: &str = "predeploy.sql";
pub const POSTDEPLOY_ENTRY: &str = "postdeploy.sql";

/// Upper bound on the buffer reserved from an entry's declared size.
const MAX_PREALLOC: usize = 16 << 20;

/// `<Metadata Name="FileName" Value="C:\build\Db.dacpac" />`
static METADATA_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(<Metadata\s+Name\s*=\s*"(?:FileName|AssemblySymbolsName)"\s+Value\s*=\s*")([^"]*)(")"#,
    )
    .expect("metadata path pattern is valid")
});

/// `FileName="C:\build\Db.dacpac"` as a plain attribute
static ATTRIBUTE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b((?:FileName|AssemblySymbolsName)\s*=\s*")([^"]*)(")"#)
        .expect("attribute path pattern is valid")
});

/// Replace build-machine paths in the model document with bare file names.
pub fn scrub_build_paths(model_xml: &str) -> String {
    let keep_file_name =
        |caps: &Captures| format!("{}{}{}", &caps[1], file_name_of(&caps[2]), &caps[3]);
    let pass = METADATA_PATH.replace_all(model_xml, keep_file_name);
    ATTRIBUTE_PATH.replace_all(&pass, keep_file_name).into_owned()
}

/// Fingerprint a dacpac: scrubbed model plus normalized deployment scripts.
pub fn schema_fingerprint(path: &Path) -> SchemaResult<ContentHash> {
    if !path.is_file() {
        return Err(SchemaError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| SchemaError::invalid(path, format!("not a zip archive ({e})")))?;

    let model = read_entry(&mut archive, MODEL_ENTRY)?
        .ok_or_else(|| SchemaError::invalid(path, format!("missing {MODEL_ENTRY}")))?;
    let predeploy = read_entry(&mut archive, PREDEPLOY_ENTRY)?
        .map(|sql| normalize_sql(&sql))
        .unwrap_or_default();
    let postdeploy = read_entry(&mut archive, POSTDEPLOY_ENTRY)?
        .map(|sql| normalize_sql(&sql))
        .unwrap_or_default();

    let model = scrub_build_paths(&model);
    debug!(
        "Fingerprinting {} (model {} bytes, predeploy {} bytes, postdeploy {} bytes)",
        path.display(),
        model.len(),
        predeploy.len(),
        postdeploy.len()
    );

    let mut hasher = Xxh64::new(0);
    hasher.update(model.as_bytes());
    hasher.update(b"\0");
    hasher.update(predeploy.as_bytes());
    hasher.update(b"\0");
    hasher.update(postdeploy.as_bytes());
    Ok(ContentHash(hasher.digest()))
}

/// Read a root entry as UTF-8 text, matching the name case-insensitively.
fn read_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> SchemaResult<Option<String>> {
    let Some(actual) = archive
        .file_names()
        .find(|entry| entry.eq_ignore_ascii_case(name))
        .map(str::to_string)
    else {
        return Ok(None);
    };

    let mut entry = match archive.by_name(&actual) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut bytes = Vec::with_capacity(prealloc_hint(entry.size()));
    entry.read_to_end(&mut bytes)?;

    let text = String::from_utf8_lossy(&bytes);
    Ok(Some(text.trim_start_matches('\u{feff}').to_string()))
}

/// The declared size comes from the archive header and is not trusted.
fn prealloc_hint(declared: u64) -> usize {
    usize::try_from(declared).map_or(MAX_PREALLOC, |size| size.min(MAX_PREALLOC))
}
