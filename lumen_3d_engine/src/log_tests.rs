//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, DefaultLogger, FileLogger and the Log handle.

use crate::log::{
    CaptureLogger, CompositeLogger, DefaultLogger, FileLogger, Log, LogEntry, LogSeverity, Logger,
};
use std::time::SystemTime;

fn entry(severity: LogSeverity, message: &str) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "lumen3d::test".to_string(),
        message: message.to_string(),
        file: None,
        line: None,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_from_name() {
    assert_eq!(LogSeverity::from_name("INFO"), Some(LogSeverity::Info));
    assert_eq!(LogSeverity::from_name("warn"), Some(LogSeverity::Warn));
    assert_eq!(LogSeverity::from_name("Error"), Some(LogSeverity::Error));
    assert_eq!(LogSeverity::from_name("verbose"), None);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        // Just verify it doesn't panic
        logger.log(&entry(severity, "message"));
    }
}

#[test]
fn test_default_logger_error_with_file_line() {
    let logger = DefaultLogger;
    let mut e = entry(LogSeverity::Error, "Critical error");
    e.file = Some("resource_manager.rs");
    e.line = Some(123);
    logger.log(&e);
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
    assert_send_sync::<FileLogger>();
    assert_send_sync::<Log>();
}

// ============================================================================
// FILE LOGGER TESTS
// ============================================================================

#[test]
fn test_file_logger_appends_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.log");

    let logger = FileLogger::create(&path).unwrap();
    logger.log(&entry(LogSeverity::Info, "first line"));
    let mut err = entry(LogSeverity::Error, "second line");
    err.file = Some("material.rs");
    err.line = Some(7);
    logger.log(&err);
    drop(logger);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[INFO ]"));
    assert!(lines[0].contains("first line"));
    assert!(lines[1].contains("[ERROR]"));
    assert!(lines[1].contains("(material.rs:7)"));
}

// ============================================================================
// COMPOSITE LOGGER TESTS
// ============================================================================

#[test]
fn test_composite_logger_forwards_to_all() {
    let a = CaptureLogger::new();
    let b = CaptureLogger::new();
    let sinks: Vec<Box<dyn Logger>> = vec![Box::new(a.clone()), Box::new(b.clone())];
    let composite = CompositeLogger::new(sinks);

    composite.log(&entry(LogSeverity::Warn, "shared"));

    assert_eq!(a.entries().len(), 1);
    assert_eq!(b.entries().len(), 1);
    assert_eq!(b.entries()[0].message, "shared");
}

// ============================================================================
// LOG HANDLE TESTS
// ============================================================================

#[test]
fn test_log_filters_below_level() {
    let capture = CaptureLogger::new();
    let log = Log::new(capture.clone(), LogSeverity::Warn);

    log.log(LogSeverity::Info, "lumen3d::test", "dropped".to_string());
    log.log(LogSeverity::Warn, "lumen3d::test", "kept".to_string());
    log.log(LogSeverity::Error, "lumen3d::test", "kept too".to_string());

    let entries = capture.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message, "kept");
}

#[test]
fn test_log_set_level() {
    let capture = CaptureLogger::new();
    let mut log = Log::new(capture.clone(), LogSeverity::Error);
    assert!(!log.enabled(LogSeverity::Info));

    log.set_level(LogSeverity::Info);
    assert!(log.enabled(LogSeverity::Info));
    assert_eq!(log.level(), LogSeverity::Info);
}

#[test]
fn test_log_detailed_carries_location() {
    let capture = CaptureLogger::new();
    let log = capture.handle();

    crate::engine_error!(log, "lumen3d::test", "failed {}", 42);

    let entries = capture.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "failed 42");
    assert!(entries[0].file.is_some());
    assert!(entries[0].line.is_some());
}

#[test]
fn test_log_clones_share_logger() {
    let capture = CaptureLogger::new();
    let log = capture.handle();
    let clone = log.clone();

    crate::engine_info!(log, "lumen3d::test", "from original");
    crate::engine_warn!(clone, "lumen3d::test", "from clone");

    assert_eq!(capture.entries().len(), 2);
}

#[test]
fn test_engine_err_logs_and_returns_error() {
    use crate::error::Error;

    let capture = CaptureLogger::new();
    let log = capture.handle();

    let err = crate::engine_err!(log, "lumen3d::test", Error::ManifestNotFound("room".to_string()));

    assert!(matches!(err, Error::ManifestNotFound(_)));
    assert!(capture.contains(LogSeverity::Error, "room"));
}

#[test]
fn test_engine_bail_returns_early() {
    use crate::error::{Error, Result};

    fn fails(log: &Log) -> Result<u32> {
        crate::engine_bail!(log, "lumen3d::test", Error::EmptyName);
    }

    let capture = CaptureLogger::new();
    let result = fails(&capture.handle());
    assert!(matches!(result, Err(Error::EmptyName)));
    assert_eq!(capture.messages(LogSeverity::Error).len(), 1);
}
