//! Black-box tests for loading and querying test properties
//!
//! Tests:
//! - Minimal Java descriptor and its defaults
//! - Missing language is a load-time failure
//! - Alias priority
//! - Lenient boolean and integer parsing
//! - Source file classification
//! - Setter write-back and re-derivation
//! - JSON snapshot of a loaded store

use anyhow::Result;
use tempfile::TempDir;
use testprops::{BuildFamily, PropertyError, PropertyStore, TestPropsError, keys};
use testprops_utils::test_support::write_properties_file;

fn load(text: &str) -> Result<PropertyStore, TestPropsError> {
    let mut store = PropertyStore::new();
    store.load_reader(text.as_bytes())?;
    Ok(store)
}

#[test]
fn test_minimal_java_descriptor_from_disk() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_properties_file(dir.path(), "test.properties", "build.language=java\n")?;

    let store = PropertyStore::from_path(&path)?;

    assert!(store.is_java()?);
    assert!(!store.is_makefile_based()?);
    assert_eq!(store.build_family()?, BuildFamily::Java);
    assert!(!store.perform_code_coverage());
    assert_eq!(store.max_drain_output_in_bytes(), keys::DEFAULT_MAX_DRAIN_OUTPUT_IN_BYTES);
    assert_eq!(store.java_source_version(), Some(keys::DEFAULT_JAVA_SOURCE_VERSION));
    assert_eq!(store.test_timeout_in_seconds(), keys::DEFAULT_PROCESS_TIMEOUT);
    assert_eq!(store.build_timeout_in_seconds(), 6 * keys::DEFAULT_PROCESS_TIMEOUT);

    Ok(())
}

#[test]
fn test_missing_language_is_not_defaulted() {
    let err = load("test.timeout=5\nbuild.make.command=make\n").unwrap_err();

    assert!(err.is_missing_required());
    assert_eq!(err.missing_key(), Some("build.language"));
    assert!(err.to_string().contains("build.language"));
}

#[test]
fn test_accessing_language_before_load_fails() {
    let store = PropertyStore::new();
    assert_eq!(store.language(), Err(PropertyError::LanguageNotSet));
    assert!(store.is_java().is_err());
}

#[test]
fn test_alias_shadowing() -> Result<()> {
    let store = load(
        "build.language=c\n\
         test.timeout=99\n\
         test.timeout.testCase=7\n",
    )?;
    assert_eq!(store.test_timeout_in_seconds(), 7);

    let store = load("build.language=c\ntest.timeout=99\n")?;
    assert_eq!(store.test_timeout_in_seconds(), 99);
    Ok(())
}

#[test]
fn test_present_but_malformed_boolean_is_false_not_default() -> Result<()> {
    for (value, expected) in [
        ("true", true),
        ("TRUE", true),
        ("yes", true),
        ("Yes", true),
        ("false", false),
        ("no", false),
        ("1", false),
        ("", false),
    ] {
        let store = load(&format!("build.language=java\nperformCodeCoverage={value}\n"))?;
        assert_eq!(store.perform_code_coverage(), expected, "value {value:?}");
    }
    Ok(())
}

#[test]
fn test_non_numeric_timeout_falls_back_to_default() -> Result<()> {
    let store = load("build.language=java\ntest.timeout=abc\nbuild.timeout=\n")?;
    assert_eq!(store.test_timeout_in_seconds(), keys::DEFAULT_PROCESS_TIMEOUT);
    assert_eq!(store.build_timeout_in_seconds(), keys::DEFAULT_BUILD_TIMEOUT);
    Ok(())
}

#[test]
fn test_source_file_classification() -> Result<()> {
    let store = load(
        "build.language=c\n\
         build.additionalSourceFileExtensions=cpp h\n\
         build.student.make.file=Makefile.student\n",
    )?;

    assert!(store.is_source_file("Foo.cpp"));
    assert!(store.is_source_file("src/Foo.h"));
    assert!(!store.is_source_file("Foo.java"));
    assert!(store.is_source_file("Makefile.student"));
    // Known quirk: makefile names are compared with the undecorated raw
    // name, so a path prefix defeats the match.
    assert!(!store.is_source_file("proj/Makefile.student"));
    Ok(())
}

#[test]
fn test_setter_round_trip_through_reload() -> Result<()> {
    let mut store = load("build.language=java\n")?;
    store.set_test_timeout_in_seconds(42);
    assert_eq!(store.properties()[keys::TEST_TIMEOUT[0]], "42");

    let serialized: String = store
        .properties()
        .iter()
        .map(|(k, v)| format!("{k}={v}\n"))
        .collect();
    let reloaded = load(&serialized)?;
    assert_eq!(reloaded.test_timeout_in_seconds(), 42);
    assert_eq!(reloaded.language()?, "java");
    Ok(())
}

#[test]
fn test_test_class_and_exec_lookup() -> Result<()> {
    let store = load(
        "build.language=c\n\
         test.class.public=public_tests\n\
         test.exec.public.list=./public_list\n",
    )?;
    assert_eq!(store.test_class("public"), Some("public_tests"));
    assert_eq!(store.test_class("release"), None);
    assert_eq!(store.test_exec("public", "list"), Some("./public_list"));
    Ok(())
}

#[test]
fn test_snapshot_serializes_resolved_fields() -> Result<()> {
    let store = load("build.language=Java\ntest.vmargs=-ea\n")?;
    let json = serde_json::to_value(&store)?;

    assert_eq!(json["language"], "java");
    assert_eq!(json["vm_args"], "-ea");
    assert_eq!(json["test_timeout_in_seconds"], keys::DEFAULT_PROCESS_TIMEOUT);
    assert_eq!(json["ld_library_path"], serde_json::Value::Null);
    assert_eq!(json["properties"]["build.language"], "java");
    Ok(())
}
