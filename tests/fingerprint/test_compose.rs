//! End-to-end fingerprint composition over a project layout

use crate::common::{TestProject, model_xml};
use schemagate::{FingerprintInputs, SchemaInput, compute_fingerprint};
use std::fs;

fn project_with_inputs() -> (TestProject, FingerprintInputs) {
    let project = TestProject::new();
    let dacpac = project.add_dacpac(
        "db/bin/Shop.Database.dacpac",
        &[
            ("model.xml", &model_xml("/build/db", "Orders")),
            ("postdeploy.sql", "EXEC dbo.Seed;"),
        ],
    );
    let config = project.add_file("app/efcpt-config.json", r#"{"names":{"root-namespace":"Shop"}}"#);
    let renaming = project.add_file("app/efcpt.renaming.json", "[]");
    project.add_file("app/Template/CodeTemplates/EFCore/EntityType.t4", "<#@ template #>");
    project.add_file("app/Template/CodeTemplates/EFCore/DbContext.t4", "<#@ context #>");

    let mut inputs = FingerprintInputs::new(SchemaInput::Artifact(dacpac));
    inputs.config_file = Some(config);
    inputs.renaming_file = Some(renaming);
    inputs.template_dir = Some(project.join("app/Template"));
    (project, inputs)
}

#[test]
fn test_unchanged_inputs_skip_generation() {
    let (project, inputs) = project_with_inputs();
    let cache = project.join("app/obj/efcpt/fingerprint.txt");

    let first = compute_fingerprint(&inputs, &cache).unwrap();
    assert!(first.has_changed);
    assert_eq!(first.segments.template_files, 2);
    assert_eq!(
        fs::read_to_string(&cache).unwrap().trim(),
        first.fingerprint.as_str()
    );

    let second = compute_fingerprint(&inputs, &cache).unwrap();
    assert!(!second.has_changed);
    assert_eq!(second.fingerprint, first.fingerprint);
}

#[test]
fn test_single_byte_config_change_is_detected() {
    let (project, inputs) = project_with_inputs();
    let cache = project.join("fingerprint.txt");
    let first = compute_fingerprint(&inputs, &cache).unwrap();

    project.add_file("app/efcpt-config.json", r#"{"names":{"root-namespace":"Shoq"}}"#);
    let second = compute_fingerprint(&inputs, &cache).unwrap();
    assert!(second.has_changed);
    assert_ne!(second.segments.config, first.segments.config);
    assert_eq!(second.segments.schema, first.segments.schema);
}

#[test]
fn test_renaming_change_is_detected() {
    let (project, inputs) = project_with_inputs();
    let cache = project.join("fingerprint.txt");
    compute_fingerprint(&inputs, &cache).unwrap();

    project.add_file("app/efcpt.renaming.json", "[ ]");
    assert!(compute_fingerprint(&inputs, &cache).unwrap().has_changed);
}

#[test]
fn test_template_edit_is_detected() {
    let (project, inputs) = project_with_inputs();
    let cache = project.join("fingerprint.txt");
    compute_fingerprint(&inputs, &cache).unwrap();

    project.add_file("app/Template/CodeTemplates/EFCore/DbContext.t4", "<#@ Context #>");
    assert!(compute_fingerprint(&inputs, &cache).unwrap().has_changed);
}

#[test]
fn test_template_rename_is_detected() {
    let (project, inputs) = project_with_inputs();
    let cache = project.join("fingerprint.txt");
    compute_fingerprint(&inputs, &cache).unwrap();

    fs::rename(
        project.join("app/Template/CodeTemplates/EFCore/EntityType.t4"),
        project.join("app/Template/CodeTemplates/EFCore/Entity.t4"),
    )
    .unwrap();
    assert!(compute_fingerprint(&inputs, &cache).unwrap().has_changed);
}

#[test]
fn test_new_template_file_is_detected() {
    let (project, inputs) = project_with_inputs();
    let cache = project.join("fingerprint.txt");
    compute_fingerprint(&inputs, &cache).unwrap();

    project.add_file("app/Template/CodeTemplates/EFCore/Readme.txt", "");
    let outcome = compute_fingerprint(&inputs, &cache).unwrap();
    assert!(outcome.has_changed);
    assert_eq!(outcome.segments.template_files, 3);
}

#[test]
fn test_schema_rebuilt_elsewhere_is_unchanged() {
    let (project, mut inputs) = project_with_inputs();
    let cache = project.join("fingerprint.txt");
    compute_fingerprint(&inputs, &cache).unwrap();

    let rebuilt = project.add_dacpac(
        "agent/work/Shop.Database.dacpac",
        &[
            ("model.xml", &model_xml(r"C:\agent\_work\7\s\db", "Orders")),
            ("postdeploy.sql", "-- seed\nEXEC   dbo.Seed;"),
        ],
    );
    inputs.schema = SchemaInput::Artifact(rebuilt);
    assert!(!compute_fingerprint(&inputs, &cache).unwrap().has_changed);
}

#[test]
fn test_corrupt_cache_counts_as_changed() {
    let (project, inputs) = project_with_inputs();
    let cache = project.add_file("fingerprint.txt", "   \n");

    let outcome = compute_fingerprint(&inputs, &cache).unwrap();
    assert!(outcome.has_changed);
    assert_eq!(outcome.previous, None);
}

#[test]
fn test_malformed_artifact_is_an_error() {
    let (project, mut inputs) = project_with_inputs();
    inputs.schema = SchemaInput::Artifact(project.add_file("db/bad.dacpac", "not a zip"));

    assert!(compute_fingerprint(&inputs, &project.join("fingerprint.txt")).is_err());
}
