//! Path predicates shared by resolution and connection-string discovery

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// True when the string carries a non-whitespace value.
pub fn has_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Returns the trimmed value, or `None` for absent/blank input.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// True for rooted paths or strings containing either separator.
///
/// A bare file name is never explicit, even if it would resolve elsewhere.
pub fn is_explicit_path(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    is_rooted(value) || value.contains('/') || value.contains('\\')
}

/// Rooted in the platform sense, or starting with a separator on any platform.
pub fn is_rooted(value: &str) -> bool {
    Path::new(value).is_absolute() || value.starts_with('/') || value.starts_with('\\')
}

/// Rewrites both separator styles to the host separator.
pub fn normalize_separators(value: &str) -> String {
    value
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

/// Last path segment, treating `/` and `\` as separators.
pub fn file_name_of(value: &str) -> &str {
    value.rsplit(['/', '\\']).next().unwrap_or(value)
}

/// Resolves `value` against `base` unless it is already rooted.
pub fn resolve_against(base: Option<&Path>, value: &str) -> PathBuf {
    let normalized = PathBuf::from(normalize_separators(value.trim()));
    if is_rooted(value.trim()) {
        return normalized;
    }
    match base {
        Some(base) if !base.as_os_str().is_empty() => base.join(normalized),
        _ => normalized,
    }
}

/// Absolute form of a path without touching the filesystem.
pub fn absolutize(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

pub fn dir_exists(path: &Path) -> bool {
    path.is_dir()
}
