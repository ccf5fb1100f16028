//! Connection string decision chain
//!
//! An ordered list of strategies, each a guard plus a resolver over the same
//! context. The first strategy whose guard passes wins. Running out of
//! strategies is a successful "no connection string" outcome, which tells the
//! caller to build the database project instead of reading a live database.
//!
//! Guards re-derive applicability by attempting the same parse the resolver
//! performs. The double read is accepted to keep both halves testable alone.

pub mod app_config;
pub mod appsettings;
pub mod kind;

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ConnectionError, ConnectionResult};
use crate::resolve::predicates::{file_exists, has_value, non_blank, resolve_against};
use kind::{ConfigKind, validate_declared_kind};

const DISCOVERED_CONFIG_NAMES: [&str; 2] = ["app.config", "web.config"];
const APPSETTINGS_FILE: &str = "appsettings.json";

/// Inputs shared by every strategy.
#[derive(Debug, Clone, Default)]
pub struct ConnectionContext {
    pub project_dir: PathBuf,
    /// Connection string supplied verbatim by the caller
    pub explicit_value: Option<String>,
    /// Explicit JSON settings file override
    pub settings_file: Option<String>,
    /// Explicit XML config file override
    pub config_file: Option<String>,
    /// Connection string name (`DefaultConnection` by default)
    pub name: String,
    /// Custom JSON key path; defaults to `ConnectionStrings:<name>`
    pub key_path: Option<String>,
}

impl ConnectionContext {
    pub fn new(project_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            project_dir: project_dir.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    fn json_key_path(&self) -> String {
        match non_blank(self.key_path.as_deref()) {
            Some(key_path) => key_path.to_string(),
            None => appsettings::default_key_path(&self.name),
        }
    }
}

/// Where a resolved connection string came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ConnectionSource {
    Explicit,
    SettingsFileOverride(PathBuf),
    ConfigFileOverride(PathBuf),
    DiscoveredSettings(PathBuf),
    DiscoveredConfig(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConnection {
    pub connection_string: String,
    pub source: ConnectionSource,
}

struct Strategy {
    name: &'static str,
    applies: fn(&ConnectionContext) -> bool,
    resolve: fn(&ConnectionContext) -> Option<ResolvedConnection>,
}

const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "explicit value",
        applies: |ctx| explicit_value(ctx).is_some(),
        resolve: explicit_value,
    },
    Strategy {
        name: "settings file override",
        applies: |ctx| settings_file_override(ctx).is_some(),
        resolve: settings_file_override,
    },
    Strategy {
        name: "config file override",
        applies: |ctx| config_file_override(ctx).is_some(),
        resolve: config_file_override,
    },
    Strategy {
        name: "discovered appsettings",
        applies: |ctx| discovered_settings(ctx).is_some(),
        resolve: discovered_settings,
    },
    Strategy {
        name: "discovered app/web config",
        applies: |ctx| discovered_config(ctx).is_some(),
        resolve: discovered_config,
    },
];

/// Run the chain. `None` means no connection string is configured.
pub fn resolve_connection_string(ctx: &ConnectionContext) -> Option<ResolvedConnection> {
    for strategy in STRATEGIES {
        if !(strategy.applies)(ctx) {
            debug!("Connection strategy '{}' not applicable", strategy.name);
            continue;
        }
        if let Some(resolved) = (strategy.resolve)(ctx) {
            info!("Using connection string from {}", strategy.name);
            return Some(resolved);
        }
    }
    debug!("No connection string configured; falling back to database project build");
    None
}

fn explicit_value(ctx: &ConnectionContext) -> Option<ResolvedConnection> {
    let value = ctx.explicit_value.as_ref().filter(|v| has_value(Some(v.as_str())))?;
    Some(ResolvedConnection {
        connection_string: value.clone(),
        source: ConnectionSource::Explicit,
    })
}

fn settings_file_override(ctx: &ConnectionContext) -> Option<ResolvedConnection> {
    let path = existing_override(ctx, ctx.settings_file.as_deref())?;
    validate_declared_kind(&path, ConfigKind::JsonSettings);
    let value = parse_by_extension(ctx, &path)?;
    Some(ResolvedConnection {
        connection_string: value,
        source: ConnectionSource::SettingsFileOverride(path),
    })
}

fn config_file_override(ctx: &ConnectionContext) -> Option<ResolvedConnection> {
    let path = existing_override(ctx, ctx.config_file.as_deref())?;
    validate_declared_kind(&path, ConfigKind::XmlConfig);
    let value = parse_by_extension(ctx, &path)?;
    Some(ResolvedConnection {
        connection_string: value,
        source: ConnectionSource::ConfigFileOverride(path),
    })
}

fn discovered_settings(ctx: &ConnectionContext) -> Option<ResolvedConnection> {
    let key_path = ctx.json_key_path();
    discover_appsettings(&ctx.project_dir)
        .into_iter()
        .find_map(|path| {
            let value = log_failure(&path, appsettings::read_connection_string(&path, &key_path))?;
            Some(ResolvedConnection {
                connection_string: value,
                source: ConnectionSource::DiscoveredSettings(path),
            })
        })
}

fn discovered_config(ctx: &ConnectionContext) -> Option<ResolvedConnection> {
    DISCOVERED_CONFIG_NAMES
        .iter()
        .map(|name| ctx.project_dir.join(name))
        .filter(|path| file_exists(path))
        .find_map(|path| {
            let value = log_failure(&path, app_config::read_connection_string(&path, &ctx.name))?;
            Some(ResolvedConnection {
                connection_string: value,
                source: ConnectionSource::DiscoveredConfig(path),
            })
        })
}

fn existing_override(ctx: &ConnectionContext, value: Option<&str>) -> Option<PathBuf> {
    let value = non_blank(value)?;
    let path = resolve_against(Some(&ctx.project_dir), value);
    if file_exists(&path) {
        Some(path)
    } else {
        warn!("Connection settings override not found: {}", path.display());
        None
    }
}

fn parse_by_extension(ctx: &ConnectionContext, path: &Path) -> Option<String> {
    let result = match ConfigKind::from_path(path) {
        Some(ConfigKind::JsonSettings) => {
            appsettings::read_connection_string(path, &ctx.json_key_path())
        }
        Some(ConfigKind::XmlConfig) => app_config::read_connection_string(path, &ctx.name),
        None => Err(ConnectionError::UnsupportedExtension {
            path: path.to_path_buf(),
        }),
    };
    log_failure(path, result)
}

fn log_failure(path: &Path, result: ConnectionResult<Option<String>>) -> Option<String> {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Skipping {}: {e}", path.display());
            None
        }
    }
}

/// `appsettings*.json` in the project directory, in parse order.
///
/// Ordinal name order, with a literal `appsettings.json` moved to the front.
pub fn discover_appsettings(project_dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(project_dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            let lower = name.to_ascii_lowercase();
            lower.starts_with("appsettings") && lower.ends_with(".json")
        })
        .collect();
    names.sort();

    if let Some(pos) = names
        .iter()
        .position(|name| name.eq_ignore_ascii_case(APPSETTINGS_FILE))
    {
        let preferred = names.remove(pos);
        names.insert(0, preferred);
    }

    if let Some(note) = ambiguity_note(project_dir, &names) {
        warn!("{note}");
    }

    names.into_iter().map(|name| project_dir.join(name)).collect()
}

/// Warning text for several settings files, naming the one tried first.
fn ambiguity_note(project_dir: &Path, ordered: &[String]) -> Option<String> {
    let [first, _, ..] = ordered else {
        return None;
    };
    Some(format!(
        "Multiple settings files found in {}: {}; preferring {first}",
        project_dir.display(),
        ordered.join(", ")
    ))
}
