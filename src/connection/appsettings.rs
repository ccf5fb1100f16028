//! Connection strings from `appsettings*.json`
//!
//! Settings files are JSONC in practice (comments, trailing commas), so they
//! go through json5. Keys are matched case-insensitively along a
//! colon-separated key path such as `ConnectionStrings:DefaultConnection`.

use serde_json::Value;
use std::path::Path;
use tracing::warn;

use crate::error::{ConnectionError, ConnectionResult};

const CONNECTION_STRINGS_SECTION: &str = "ConnectionStrings";

/// Default key path for a named connection string.
pub fn default_key_path(name: &str) -> String {
    format!("{CONNECTION_STRINGS_SECTION}:{name}")
}

/// Read a connection string from a settings file.
pub fn read_connection_string(path: &Path, key_path: &str) -> ConnectionResult<Option<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| ConnectionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let root: Value = json5::from_str(&content).map_err(|e| ConnectionError::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(lookup(&root, key_path, path))
}

fn lookup(root: &Value, key_path: &str, origin: &Path) -> Option<String> {
    if let Some(value) = navigate(root, key_path).and_then(non_blank_string) {
        return Some(value);
    }

    // Named entry missing: fall back to the first usable entry of the section.
    let (section, name) = key_path.split_once(':')?;
    if !section.eq_ignore_ascii_case(CONNECTION_STRINGS_SECTION) {
        return None;
    }
    let entries = get_ignore_case(root, section)?.as_object()?;
    let (first_name, value) = entries
        .iter()
        .find_map(|(k, v)| non_blank_string(v).map(|s| (k, s)))?;
    warn!(
        "Connection string '{name}' not found in {}; using '{first_name}' instead",
        origin.display()
    );
    Some(value)
}

fn navigate<'a>(root: &'a Value, key_path: &str) -> Option<&'a Value> {
    key_path
        .split(':')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, get_ignore_case)
}

fn get_ignore_case<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let object = value.as_object()?;
    object.get(key).or_else(|| {
        object
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

fn non_blank_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
