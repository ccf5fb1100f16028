//! Connection strings from `app.config` / `web.config`
//!
//! Reads `<connectionStrings><add name="..." connectionString="..."/></connectionStrings>`.

use std::path::Path;
use tracing::warn;

use crate::error::{ConnectionError, ConnectionResult};

/// Read the named connection string from an XML application config.
pub fn read_connection_string(path: &Path, name: &str) -> ConnectionResult<Option<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| ConnectionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = content.trim_start_matches('\u{feff}');
    let doc = roxmltree::Document::parse(content).map_err(|source| ConnectionError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: Vec<(&str, &str)> = doc
        .descendants()
        .filter(|node| node.has_tag_name("connectionStrings"))
        .flat_map(|section| section.children())
        .filter(|node| node.has_tag_name("add"))
        .filter_map(|node| {
            let value = node.attribute("connectionString")?;
            Some((node.attribute("name").unwrap_or_default(), value))
        })
        .filter(|(_, value)| !value.trim().is_empty())
        .collect();

    if let Some((_, value)) = entries
        .iter()
        .find(|(entry_name, _)| entry_name.eq_ignore_ascii_case(name))
    {
        return Ok(Some(value.to_string()));
    }

    Ok(entries.first().map(|(first_name, value)| {
        warn!(
            "Connection string '{name}' not found in {}; using '{first_name}' instead",
            path.display()
        );
        value.to_string()
    }))
}
