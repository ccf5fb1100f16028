//! Declared settings-file kind versus what the file looks like

use std::path::Path;
use tracing::warn;

/// The two configuration shapes a connection string can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    /// `appsettings.json` style structured settings
    JsonSettings,
    /// `app.config` / `web.config` XML application config
    XmlConfig,
}

impl ConfigKind {
    /// Infer the kind from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::JsonSettings),
            "config" => Some(Self::XmlConfig),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::JsonSettings => "JSON settings (.json)",
            Self::XmlConfig => "XML config (.config)",
        }
    }
}

/// Checks that `path` matches the kind the caller declared for it.
///
/// A mismatch is logged and reported, never fatal; parsing still goes by
/// the actual extension.
pub fn validate_declared_kind(path: &Path, declared: ConfigKind) -> bool {
    match ConfigKind::from_path(path) {
        Some(actual) if actual == declared => true,
        Some(actual) => {
            warn!(
                "{} was supplied as {} but looks like {}; parsing it by extension",
                path.display(),
                declared.label(),
                actual.label()
            );
            false
        }
        None => {
            warn!(
                "{} was supplied as {} but has an unrecognized extension",
                path.display(),
                declared.label()
            );
            false
        }
    }
}
