//! Error types for resolution and fingerprinting
//!
//! Each subsystem owns a thiserror enum. Resolution errors are always fatal
//! for the caller; fingerprint errors are only raised for required inputs,
//! optional inputs degrade to empty segments instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::io::exit_code::ExitCode;

/// Errors raised by the resource resolution engine
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error(
        "Override file not found: {path}\nSuggestion: Check the explicit path, it is resolved relative to the project directory"
    )]
    FileOverrideNotFound { path: PathBuf },

    #[error(
        "Override directory not found: {path}\nSuggestion: Check the explicit path, it is resolved relative to the project directory"
    )]
    DirectoryOverrideNotFound { path: PathBuf },

    #[error("{}", format_not_found("file", .candidates, .tiers))]
    FileNotFound {
        candidates: Vec<String>,
        tiers: Vec<String>,
    },

    #[error("{}", format_not_found("directory", .candidates, .tiers))]
    DirectoryNotFound {
        candidates: Vec<String>,
        tiers: Vec<String>,
    },
}

/// Errors raised while fingerprinting a schema artifact
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Schema artifact not found: {path}\nSuggestion: Build the database project first")]
    NotFound { path: PathBuf },

    #[error("Invalid schema artifact '{path}': {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the fingerprint composer
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl FingerprintError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while reading a connection-string source.
///
/// The decision chain logs these and moves on to the next source.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON settings in '{path}': {reason}")]
    Json { path: PathBuf, reason: String },

    #[error("Invalid XML config in '{path}': {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Unsupported settings file extension: {path}")]
    UnsupportedExtension { path: PathBuf },
}

/// Top-level error surfaced by the CLI
#[derive(Error, Debug)]
pub enum SchemagateError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ResolutionResult<T> = Result<T, ResolutionError>;
pub type SchemaResult<T> = Result<T, SchemaError>;
pub type FingerprintResult<T> = Result<T, FingerprintError>;
pub type ConnectionResult<T> = Result<T, ConnectionError>;

fn format_not_found(kind: &str, candidates: &[String], tiers: &[String]) -> String {
    let mut msg = format!(
        "No {kind} found matching any of: {}\n",
        candidates.join(", ")
    );
    if tiers.is_empty() {
        msg.push_str("No search locations were eligible");
    } else {
        msg.push_str("Searched:\n");
        for tier in tiers {
            msg.push_str(&format!("  {tier}\n"));
        }
        msg.push_str("Suggestion: Add one of the candidates to the project or pass an explicit path");
    }
    msg
}

impl SchemaError {
    pub fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl SchemagateError {
    /// Map errors to CLI exit codes.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SchemagateError::Resolution(_) => ExitCode::NotFound,
            SchemagateError::Fingerprint(FingerprintError::Schema(schema)) => match schema {
                SchemaError::NotFound { .. } => ExitCode::NotFound,
                SchemaError::InvalidFormat { .. } | SchemaError::Zip(_) => ExitCode::ParseError,
                SchemaError::Io(_) => ExitCode::IoError,
            },
            SchemagateError::Fingerprint(_) | SchemagateError::Io(_) => ExitCode::IoError,
            SchemagateError::Config(_) => ExitCode::ConfigError,
        }
    }

    /// Stable code for JSON responses
    pub fn status_code(&self) -> &'static str {
        match self {
            SchemagateError::Resolution(
                ResolutionError::FileOverrideNotFound { .. }
                | ResolutionError::DirectoryOverrideNotFound { .. },
            ) => "OVERRIDE_NOT_FOUND",
            SchemagateError::Resolution(_) => "NOT_FOUND",
            SchemagateError::Fingerprint(FingerprintError::Schema(_)) => "INVALID_SCHEMA_ARTIFACT",
            SchemagateError::Fingerprint(_) | SchemagateError::Io(_) => "IO_ERROR",
            SchemagateError::Config(_) => "CONFIG_ERROR",
        }
    }
}
