//! Tests for tiered file resolution

use crate::common::TestProject;
use schemagate::{ResolutionContext, ResolutionError, build_candidate_names, resolve_file};

fn config_context(project: &TestProject, override_path: Option<&str>) -> ResolutionContext {
    let names = build_candidate_names(override_path, &["efcpt-config.json"]);
    ResolutionContext::new(project.join("src/Shop.Data"), names)
        .with_override(override_path)
        .with_solution_dir(Some("../.."), true)
        .with_defaults_root(Some(project.join("pkg/defaults")))
}

#[test]
fn test_project_match_never_consults_later_tiers() {
    let project = TestProject::new();
    let expected = project.add_file("src/Shop.Data/efcpt-config.json", "{}");
    project.add_file("efcpt-config.json", "{}");
    project.add_file("pkg/defaults/efcpt-config.json", "{}");

    assert_eq!(resolve_file(&config_context(&project, None)).unwrap(), expected);
}

#[test]
fn test_solution_tier_before_defaults() {
    let project = TestProject::new();
    project.add_dir("src/Shop.Data");
    project.add_file("efcpt-config.json", "{\"solution\":true}");
    project.add_file("pkg/defaults/efcpt-config.json", "{}");

    let found = resolve_file(&config_context(&project, None)).unwrap();
    assert_eq!(std::fs::read_to_string(found).unwrap(), "{\"solution\":true}");
}

#[test]
fn test_defaults_tier_is_last_resort() {
    let project = TestProject::new();
    project.add_dir("src/Shop.Data");
    let expected = project.add_file("pkg/defaults/efcpt-config.json", "{}");

    assert_eq!(resolve_file(&config_context(&project, None)).unwrap(), expected);
}

#[test]
fn test_explicit_override_relative_to_project() {
    let project = TestProject::new();
    let expected = project.add_file("src/Shop.Data/config/custom.json", "{}");
    project.add_file("src/Shop.Data/efcpt-config.json", "{}");

    let found = resolve_file(&config_context(&project, Some("config/custom.json"))).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_backslash_override_is_explicit() {
    let project = TestProject::new();
    let expected = project.add_file("src/Shop.Data/config/custom.json", "{}");

    let found = resolve_file(&config_context(&project, Some("config\\custom.json"))).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_missing_override_fails_even_with_fallback_match() {
    let project = TestProject::new();
    project.add_file("src/Shop.Data/custom.json", "{}");
    project.add_file("pkg/defaults/custom.json", "{}");

    let result = resolve_file(&config_context(&project, Some("config/custom.json")));
    match result {
        Err(ResolutionError::FileOverrideNotFound { path }) => {
            assert!(path.ends_with("config/custom.json"));
            assert!(path.is_absolute());
        }
        other => panic!("Expected FileOverrideNotFound, got {other:?}"),
    }
}

#[test]
fn test_bare_override_name_searches_tiers() {
    let project = TestProject::new();
    project.add_dir("src/Shop.Data");
    let expected = project.add_file("pkg/defaults/custom.json", "{}");

    let found = resolve_file(&config_context(&project, Some("custom.json"))).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_blank_override_is_absent() {
    let project = TestProject::new();
    let expected = project.add_file("src/Shop.Data/efcpt-config.json", "{}");

    let found = resolve_file(&config_context(&project, Some("   "))).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_not_found_lists_candidates() {
    let project = TestProject::new();
    project.add_dir("src/Shop.Data");

    let err = resolve_file(&config_context(&project, None)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("efcpt-config.json"));
    assert!(msg.contains("project:"));
    assert!(msg.contains("solution:"));
    assert!(msg.contains("defaults:"));
}
