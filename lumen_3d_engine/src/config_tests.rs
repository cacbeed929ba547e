//! Unit tests for config.rs

use super::*;
use std::io::Write;

// ============================================================================
// Tests: parsing
// ============================================================================

#[test]
fn test_empty_object_gives_defaults() {
    let config: EngineConfig = "{}".parse().unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.resource_path, PathBuf::from("data/"));
    assert_eq!(config.logging.level, "WARN");
    assert_eq!(config.log_severity(), Some(LogSeverity::Warn));
    assert!(config.shaders.is_none());
}

#[test]
fn test_full_config() {
    let config: EngineConfig = r#"{
        "resource_path": "assets",
        "logging": { "level": "info", "file": "engine.log" },
        "materials": ["common", "props"],
        "scenes": ["room"],
        "shaders": "default"
    }"#
    .parse()
    .unwrap();

    assert_eq!(config.resource_path, PathBuf::from("assets"));
    assert_eq!(config.log_severity(), Some(LogSeverity::Info));
    assert_eq!(config.logging.file, Some(PathBuf::from("engine.log")));
    assert_eq!(config.materials, vec!["common", "props"]);
    assert_eq!(config.scenes, vec!["room"]);
    assert_eq!(config.shaders.as_deref(), Some("default"));
}

#[test]
fn test_camel_case_resource_path() {
    let config: EngineConfig = r#"{ "resourcePath": "res/" }"#.parse().unwrap();
    assert_eq!(config.resource_path, PathBuf::from("res/"));
}

#[test]
fn test_unknown_level() {
    let config: EngineConfig = r#"{ "logging": { "level": "LOUD" } }"#.parse().unwrap();
    assert_eq!(config.log_severity(), None);
}

#[test]
fn test_invalid_json() {
    assert!(matches!("{ nope".parse::<EngineConfig>(), Err(Error::Parse(_))));
    assert!(matches!(r#"{ "materials": 3 }"#.parse::<EngineConfig>(), Err(Error::Parse(_))));
}

// ============================================================================
// Tests: from_file
// ============================================================================

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "scenes": ["room"] }}"#).unwrap();

    let config = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(config.scenes, vec!["room"]);
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = EngineConfig::from_file(dir.path().join("main.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}
