//! Error type tests
//!
//! Tests for WeaveError and its conversions.

use std::path::{Path, PathBuf};

use crate::error::WeaveError;
use crate::error::config::{
    bundle_not_found, invalid as config_invalid, invalid_glob, not_found as config_not_found,
    stage_missing,
};
use crate::error::copy::{malformed, sandbox_violation};
use crate::error::fs::{io_error, read_failed, write_failed};
use crate::error::merge::{dependency_conflict, duplicate_alias, duplicate_entry};
use crate::error::npm::invalid_script;
use crate::merge::ConflictRecord;
use miette::Diagnostic;

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

fn conflict(key: &str, first: (&str, &str), second: (&str, &str)) -> ConflictRecord {
    ConflictRecord {
        key: key.to_string(),
        first_owner: first.0.to_string(),
        first_value: first.1.to_string(),
        second_owner: second.0.to_string(),
        second_value: second.1.to_string(),
    }
}

fn code(err: &WeaveError) -> Option<String> {
    err.code().map(|c| c.to_string())
}

#[test]
fn test_duplicate_entry_display() {
    let err = duplicate_entry(conflict(
        "app",
        ("bundles/a", "./a.js"),
        ("bundles/b", "./b.js"),
    ));
    assert_eq!(
        err.to_string(),
        "Duplicated bundle entry for `app:./a.js` in bundle `bundles/a` and \
         `app:./b.js` in bundle `bundles/b`"
    );
    assert_eq!(code(&err), Some("packweave::merge::duplicate_entry".to_string()));
}

#[test]
fn test_duplicate_alias_code() {
    let err = duplicate_alias(conflict(
        "@theme",
        ("bundles/a", "./js"),
        ("bundles/b", "./src"),
    ));
    assert!(matches!(err, WeaveError::DuplicateAlias { .. }));
    assert_eq!(code(&err), Some("packweave::merge::duplicate_alias".to_string()));
}

test_error_contains!(
    test_dependency_conflict_display,
    dependency_conflict(
        "peerDependencies",
        conflict("react", ("base manifest", "^18.0.0"), ("bundles/b", "^17.0.0")),
    ),
    "peerDependencies",
    "`react`",
    "`^18.0.0` from base manifest",
    "`^17.0.0` from bundles/b"
);

test_error_contains!(
    test_malformed_copy_display,
    malformed("bundles/a", "{'to': 'img'}"),
    "Invalid copy instruction {'to': 'img'}",
    "bundles/a"
);

#[test]
fn test_sandbox_violation_lists_roots() {
    let err = sandbox_violation(
        "bundles/a",
        "{'from': '../../etc', 'to': 'assets'}",
        Path::new("/etc"),
        Path::new("/proj/static/assets"),
        &[PathBuf::from("/proj/static"), PathBuf::from("/node_modules")],
    );
    let message = err.to_string();
    assert!(message.contains("{'from': '/etc', 'to': '/proj/static/assets'}"));
    assert!(message.ends_with("Allowed paths: ['/proj/static', '/node_modules']"));
    assert_eq!(code(&err), Some("packweave::copy::sandbox_violation".to_string()));
}

#[test]
fn test_invalid_script_lists_available() {
    let scripts = vec!["build".to_string(), "start".to_string()];
    match invalid_script("deploy", &scripts) {
        WeaveError::InvalidScript { name, available } => {
            assert_eq!(name, "deploy");
            assert_eq!(available, "build, start");
        }
        other => panic!("Expected InvalidScript, got {other:?}"),
    }

    match invalid_script("deploy", &Vec::new()) {
        WeaveError::InvalidScript { available, .. } => assert_eq!(available, "(none)"),
        other => panic!("Expected InvalidScript, got {other:?}"),
    }
}

test_error_contains!(
    test_config_not_found_display,
    config_not_found(Path::new("/srv/site/packweave.yaml")),
    "Configuration file not found",
    "/srv/site/packweave.yaml"
);

test_error_contains!(
    test_config_invalid_display,
    config_invalid("'working_dir' cannot be empty"),
    "Invalid configuration",
    "working_dir"
);

test_error_contains!(
    test_invalid_glob_display,
    invalid_glob("a[b", "unclosed character class"),
    "invalid skip pattern 'a[b'"
);

test_error_contains!(
    test_bundle_not_found_display,
    bundle_not_found(Path::new("bundles/theme/bundle.yaml")),
    "Bundle descriptor not found",
    "bundles/theme/bundle.yaml"
);

test_error_contains!(
    test_stage_missing_display,
    stage_missing("template"),
    "no template stage"
);

#[test]
fn test_fs_errors() {
    assert!(matches!(
        read_failed(Path::new("package.json"), "denied"),
        WeaveError::FileReadFailed { .. }
    ));
    assert!(matches!(
        write_failed(Path::new("package.json"), "denied"),
        WeaveError::FileWriteFailed { .. }
    ));
    assert_eq!(io_error("boom").to_string(), "IO error: boom");
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: WeaveError = io_err.into();
    assert!(matches!(err, WeaveError::IoError { .. }));
}

#[test]
fn test_yaml_error_conversion() {
    let yaml_str = "invalid: yaml: content: [unclosed";
    let parse_result: std::result::Result<serde_yaml::Value, _> = serde_yaml::from_str(yaml_str);
    let yaml_err = parse_result.expect_err("YAML parsing should have failed");
    let err: WeaveError = yaml_err.into();
    assert!(matches!(err, WeaveError::ConfigParseFailed { .. }));
}

#[test]
fn test_json_error_conversion() {
    let parse_result: std::result::Result<serde_json::Value, _> =
        serde_json::from_str("invalid json content");
    let json_err = parse_result.expect_err("JSON parsing should have failed");
    let err: WeaveError = json_err.into();
    assert!(matches!(err, WeaveError::ConfigParseFailed { .. }));
}
