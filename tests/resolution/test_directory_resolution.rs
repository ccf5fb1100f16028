//! Tests for tiered directory resolution

use crate::common::TestProject;
use schemagate::{ResolutionContext, ResolutionError, build_candidate_names, resolve_directory};

const TEMPLATE_NAMES: [&str; 3] = ["Template", "CodeTemplates", "Templates"];

#[test]
fn test_first_candidate_name_wins_in_tier() {
    let project = TestProject::new();
    project.add_dir("app/Templates");
    let expected = project.add_dir("app/CodeTemplates");

    let ctx = ResolutionContext::new(
        project.join("app"),
        build_candidate_names(None, &TEMPLATE_NAMES),
    );
    assert_eq!(resolve_directory(&ctx).unwrap(), expected);
}

#[test]
fn test_defaults_template_directory() {
    let project = TestProject::new();
    project.add_dir("app");
    let expected = project.add_dir("defaults/Template");

    let ctx = ResolutionContext::new(
        project.join("app"),
        build_candidate_names(None, &TEMPLATE_NAMES),
    )
    .with_defaults_root(Some(project.join("defaults")));
    assert_eq!(resolve_directory(&ctx).unwrap(), expected);
}

#[test]
fn test_missing_directory_override() {
    let project = TestProject::new();
    project.add_dir("app/Template");

    let ctx = ResolutionContext::new(
        project.join("app"),
        build_candidate_names(Some("custom/Template"), &TEMPLATE_NAMES),
    )
    .with_override(Some("custom/Template"));

    assert!(matches!(
        resolve_directory(&ctx),
        Err(ResolutionError::DirectoryOverrideNotFound { .. })
    ));
}

#[test]
fn test_file_with_directory_name_is_not_a_match() {
    let project = TestProject::new();
    project.add_file("app/Template", "oops");

    let ctx = ResolutionContext::new(
        project.join("app"),
        build_candidate_names(None, &["Template"]),
    );
    assert!(matches!(
        resolve_directory(&ctx),
        Err(ResolutionError::DirectoryNotFound { .. })
    ));
}
