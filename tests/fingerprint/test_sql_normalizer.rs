//! Properties of deployment script normalization

use schemagate::normalize_sql;

const SCRIPTS: [&str; 6] = [
    "MERGE INTO dbo.Status AS t\nUSING (VALUES (1, 'Open'), (2, 'Closed')) AS s (Id, Name)\nON t.Id = s.Id;",
    "-- seed lookups\r\nINSERT INTO dbo.Lookup VALUES ('a -- b');\r\n/* done */",
    "PRINT 'O''Brien   was here';  GO",
    "SELECT 1/2, 3-4, '/*', 5",
    "\t\n  ",
    "UPDATE t SET x = 'unterminated",
];

#[test]
fn test_normalizing_twice_changes_nothing() {
    for script in SCRIPTS {
        let once = normalize_sql(script);
        assert_eq!(normalize_sql(&once), once, "not idempotent for {script:?}");
    }
}

#[test]
fn test_output_is_single_trimmed_line() {
    for script in SCRIPTS {
        let out = normalize_sql(script);
        assert_eq!(out.trim(), out);
        assert!(!out.contains('\n'));
        assert!(!out.contains('\r'));
    }
}

#[test]
fn test_literal_contents_survive() {
    let out = normalize_sql(SCRIPTS[2]);
    assert!(out.contains("'O''Brien   was here'"));

    let out = normalize_sql(SCRIPTS[1]);
    assert_eq!(out, "INSERT INTO dbo.Lookup VALUES ('a -- b');");
}

#[test]
fn test_arithmetic_operators_are_not_comments() {
    assert_eq!(normalize_sql(SCRIPTS[3]), "SELECT 1/2, 3-4, '/*', 5");
}
