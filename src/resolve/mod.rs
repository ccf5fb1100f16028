//! Resource resolution
//!
//! Locates configuration files and template directories among an explicit
//! override, the project directory, an optional solution directory and the
//! packaged defaults, in that order.

pub mod candidates;
pub mod engine;
pub mod predicates;

pub use candidates::build_candidate_names;
pub use engine::{NotFoundReport, ResolutionContext, resolve, resolve_directory, resolve_file};
