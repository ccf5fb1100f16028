//! Ordered fallback search over override, project, solution and defaults tiers

use std::path::{Path, PathBuf};
use tracing::debug;

use super::predicates::{
    absolutize, dir_exists, file_exists, is_explicit_path, non_blank, resolve_against,
};
use crate::error::{ResolutionError, ResolutionResult};

/// Inputs for one resolution call. Built fresh by the caller, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    pub override_path: Option<String>,
    pub project_dir: Option<PathBuf>,
    pub solution_dir: Option<String>,
    pub probe_solution_dir: bool,
    pub defaults_root: Option<PathBuf>,
    /// Priority order among same-tier candidates; never reordered.
    pub candidate_names: Vec<String>,
}

impl ResolutionContext {
    pub fn new(project_dir: impl Into<PathBuf>, candidate_names: Vec<String>) -> Self {
        Self {
            project_dir: Some(project_dir.into()),
            candidate_names,
            ..Self::default()
        }
    }

    pub fn with_override(mut self, override_path: Option<impl Into<String>>) -> Self {
        self.override_path = override_path.map(Into::into);
        self
    }

    pub fn with_solution_dir(mut self, solution_dir: Option<impl Into<String>>, probe: bool) -> Self {
        self.solution_dir = solution_dir.map(Into::into);
        self.probe_solution_dir = probe;
        self
    }

    pub fn with_defaults_root(mut self, defaults_root: Option<impl Into<PathBuf>>) -> Self {
        self.defaults_root = defaults_root.map(Into::into);
        self
    }

    fn project_dir(&self) -> Option<&Path> {
        self.project_dir
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// What was searched when no tier matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundReport {
    pub candidates: Vec<String>,
    /// Eligible tiers in search order, formatted as `label: path`.
    pub tiers: Vec<String>,
}

/// Generic resolution, parameterized by the existence test and error factories.
///
/// An explicit override that does not exist fails immediately, even when a
/// fallback tier would have matched.
pub fn resolve<E>(
    ctx: &ResolutionContext,
    exists: impl Fn(&Path) -> bool,
    override_not_found: impl FnOnce(PathBuf) -> E,
    not_found: impl FnOnce(NotFoundReport) -> E,
) -> Result<PathBuf, E> {
    if let Some(override_path) = non_blank(ctx.override_path.as_deref()) {
        if is_explicit_path(override_path) {
            let candidate = absolutize(resolve_against(ctx.project_dir(), override_path));
            if exists(&candidate) {
                debug!("Resolved explicit override {}", candidate.display());
                return Ok(candidate);
            }
            return Err(override_not_found(candidate));
        }
    }

    let mut tiers = Vec::new();

    if let Some(project) = ctx.project_dir() {
        tiers.push(format!("project: {}", project.display()));
        if let Some(found) = probe_dir(project, &ctx.candidate_names, &exists) {
            debug!("Resolved {} in project directory", found.display());
            return Ok(found);
        }
    }

    if ctx.probe_solution_dir {
        if let Some(solution) = non_blank(ctx.solution_dir.as_deref()) {
            let solution = resolve_against(ctx.project_dir(), solution);
            tiers.push(format!("solution: {}", solution.display()));
            if let Some(found) = probe_dir(&solution, &ctx.candidate_names, &exists) {
                debug!("Resolved {} in solution directory", found.display());
                return Ok(found);
            }
        }
    }

    if let Some(defaults) = ctx
        .defaults_root
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty())
    {
        tiers.push(format!("defaults: {}", defaults.display()));
        if let Some(found) = probe_dir(defaults, &ctx.candidate_names, &exists) {
            debug!("Resolved {} in packaged defaults", found.display());
            return Ok(found);
        }
    }

    Err(not_found(NotFoundReport {
        candidates: ctx.candidate_names.clone(),
        tiers,
    }))
}

fn probe_dir(dir: &Path, names: &[String], exists: &impl Fn(&Path) -> bool) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| exists(candidate))
        .map(absolutize)
}

/// Locate a file through the four tiers.
pub fn resolve_file(ctx: &ResolutionContext) -> ResolutionResult<PathBuf> {
    resolve(
        ctx,
        file_exists,
        |path| ResolutionError::FileOverrideNotFound { path },
        |report| ResolutionError::FileNotFound {
            candidates: report.candidates,
            tiers: report.tiers,
        },
    )
}

/// Locate a directory through the four tiers.
pub fn resolve_directory(ctx: &ResolutionContext) -> ResolutionResult<PathBuf> {
    resolve(
        ctx,
        dir_exists,
        |path| ResolutionError::DirectoryOverrideNotFound { path },
        |report| ResolutionError::DirectoryNotFound {
            candidates: report.candidates,
            tiers: report.tiers,
        },
    )
}
