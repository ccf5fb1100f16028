//! Configuration module for schemagate.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`schemagate.toml` in the project directory)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the binary)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `SCHEMAGATE_` and use double
//! underscores to separate nested levels:
//! - `SCHEMAGATE_CONNECTION__NAME=Reporting` sets `connection.name`
//! - `SCHEMAGATE_RESOURCES__PROBE_SOLUTION_DIR=false` sets `resources.probe_solution_dir`
//! - `SCHEMAGATE_FINGERPRINT__CACHE_FILE=obj/fp.txt` sets `fingerprint.cache_file`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project directory
pub const SETTINGS_FILE: &str = "schemagate.toml";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug logging
    #[serde(default)]
    pub debug: bool,

    /// Candidate names and search tiers for resource resolution
    #[serde(default)]
    pub resources: ResourceConfig,

    /// Connection string lookup
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Fingerprint cache and extras
    #[serde(default)]
    pub fingerprint: FingerprintConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResourceConfig {
    /// Fallback names for the generator configuration file
    #[serde(default = "default_config_names")]
    pub config_names: Vec<String>,

    /// Fallback names for the renaming-rules file
    #[serde(default = "default_renaming_names")]
    pub renaming_names: Vec<String>,

    /// Fallback names for the template directory
    #[serde(default = "default_template_dir_names")]
    pub template_dir_names: Vec<String>,

    /// Solution directory, relative to the project directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_dir: Option<String>,

    /// Whether the solution directory tier is searched
    #[serde(default = "default_true")]
    pub probe_solution_dir: bool,

    /// Packaged defaults location, searched last
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults_root: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConnectionConfig {
    /// Connection string name
    #[serde(default = "default_connection_name")]
    pub name: String,

    /// JSON key path override, e.g. `Data:Primary:ConnectionString`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FingerprintConfig {
    /// Cache file, relative to the project directory
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,

    /// Generator version folded into the fingerprint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
}

fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_config_names() -> Vec<String> {
    vec!["efcpt-config.json".to_string()]
}
fn default_renaming_names() -> Vec<String> {
    vec!["efcpt.renaming.json".to_string()]
}
fn default_template_dir_names() -> Vec<String> {
    vec![
        "Template".to_string(),
        "CodeTemplates".to_string(),
        "Templates".to_string(),
    ]
}
fn default_connection_name() -> String {
    "DefaultConnection".to_string()
}
fn default_cache_file() -> PathBuf {
    PathBuf::from("obj/efcpt/fingerprint.txt")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            resources: ResourceConfig::default(),
            connection: ConnectionConfig::default(),
            fingerprint: FingerprintConfig::default(),
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            config_names: default_config_names(),
            renaming_names: default_renaming_names(),
            template_dir_names: default_template_dir_names(),
            solution_dir: None,
            probe_solution_dir: true,
            defaults_root: None,
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            name: default_connection_name(),
            key_path: None,
        }
    }
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            cache_file: default_cache_file(),
            tool_version: None,
        }
    }
}

impl Settings {
    /// Load configuration for a project directory.
    ///
    /// `explicit` replaces the project's `schemagate.toml` when given.
    pub fn load_from(project_dir: &Path, explicit: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        let config_path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project_dir.join(SETTINGS_FILE));
        Self::figment(&config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels
            .merge(Env::prefixed("SCHEMAGATE_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Cache file resolved against the project directory.
    pub fn cache_file(&self, project_dir: &Path) -> PathBuf {
        if self.fingerprint.cache_file.is_absolute() {
            self.fingerprint.cache_file.clone()
        } else {
            project_dir.join(&self.fingerprint.cache_file)
        }
    }

    /// Write a default `schemagate.toml` into `dir`.
    pub fn init_config_file(dir: &Path, force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = dir.join(SETTINGS_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        std::fs::create_dir_all(dir)?;
        let toml_content = toml::to_string_pretty(&Settings::default())?;
        std::fs::write(&config_path, toml_content)?;

        Ok(config_path)
    }
}
