//! Build fingerprinting
//!
//! Decides whether code generation can be skipped by hashing everything that
//! influences its output.

pub mod cache;
pub mod compose;
pub mod hasher;
pub mod schema;
pub mod sql;
pub mod templates;

pub use cache::FingerprintCache;
pub use compose::{
    Fingerprint, FingerprintInputs, FingerprintOutcome, SchemaInput, Segments,
    compose_fingerprint, compute_fingerprint,
};
pub use hasher::{ContentHash, hash_bytes, hash_file, hash_str};
pub use schema::{schema_fingerprint, scrub_build_paths};
pub use sql::normalize_sql;
pub use templates::{TemplateEntry, TemplateTreeDigest};
