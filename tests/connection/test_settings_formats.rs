//! Settings file formats accepted during connection string discovery

use crate::common::TestProject;
use schemagate::{ConnectionContext, resolve_connection_string};

#[test]
fn test_settings_with_comments_and_trailing_commas() {
    let project = TestProject::new();
    project.add_file(
        "appsettings.json",
        r#"{
  // local development database
  "ConnectionStrings": {
    "DefaultConnection": "Server=(localdb)\\mssqllocaldb;Database=Shop",
  },
}"#,
    );

    let ctx = ConnectionContext::new(project.path(), "DefaultConnection");
    assert_eq!(
        resolve_connection_string(&ctx).unwrap().connection_string,
        r"Server=(localdb)\mssqllocaldb;Database=Shop"
    );
}

#[test]
fn test_key_lookup_ignores_case() {
    let project = TestProject::new();
    project.add_file(
        "appsettings.json",
        r#"{ "connectionStrings": { "defaultconnection": "Server=lower" } }"#,
    );

    let ctx = ConnectionContext::new(project.path(), "DefaultConnection");
    assert_eq!(
        resolve_connection_string(&ctx).unwrap().connection_string,
        "Server=lower"
    );
}

#[test]
fn test_custom_key_path() {
    let project = TestProject::new();
    project.add_file(
        "appsettings.json",
        r#"{ "Database": { "Primary": { "ConnectionString": "Server=custom" } } }"#,
    );

    let mut ctx = ConnectionContext::new(project.path(), "DefaultConnection");
    ctx.key_path = Some("Database:Primary:ConnectionString".to_string());
    assert_eq!(
        resolve_connection_string(&ctx).unwrap().connection_string,
        "Server=custom"
    );
}

#[test]
fn test_environment_settings_file_used_when_base_lacks_value() {
    let project = TestProject::new();
    project.add_file("appsettings.json", r#"{ "Logging": {} }"#);
    project.add_file(
        "appsettings.Development.json",
        r#"{ "ConnectionStrings": { "DefaultConnection": "Server=dev" } }"#,
    );

    let ctx = ConnectionContext::new(project.path(), "DefaultConnection");
    assert_eq!(
        resolve_connection_string(&ctx).unwrap().connection_string,
        "Server=dev"
    );
}

#[test]
fn test_xml_config_name_ignores_case() {
    let project = TestProject::new();
    project.add_file(
        "app.config",
        "\u{feff}<configuration><connectionStrings><add name=\"defaultconnection\" connectionString=\"Server=bom\"/></connectionStrings></configuration>",
    );

    let ctx = ConnectionContext::new(project.path(), "DefaultConnection");
    assert_eq!(
        resolve_connection_string(&ctx).unwrap().connection_string,
        "Server=bom"
    );
}
