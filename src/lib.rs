/// The main library module for schemagate
///
/// Decides whether schema-to-code generation can be skipped, and where its
/// configuration and templates are loaded from.
pub mod config;
pub mod connection;
pub mod error;
pub mod fingerprint;
pub mod io;
pub mod resolve;

// Explicit exports for better API clarity
pub use config::Settings;
pub use connection::{
    ConnectionContext, ConnectionSource, ResolvedConnection, resolve_connection_string,
};
pub use error::{
    ConnectionError, FingerprintError, FingerprintResult, ResolutionError, ResolutionResult,
    SchemaError, SchemaResult, SchemagateError,
};
pub use fingerprint::{
    Fingerprint, FingerprintInputs, FingerprintOutcome, SchemaInput, compute_fingerprint,
    normalize_sql, schema_fingerprint,
};
pub use resolve::{ResolutionContext, build_candidate_names, resolve_directory, resolve_file};
