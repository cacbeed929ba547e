//! Logging system for Lumen3D Engine
//!
//! This module provides a flexible logging system with:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default, optional plain-text file sink
//! - A cloneable `Log` handle passed to every component that logs
//! - File and line information for detailed ERROR logs

use colored::*;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to create custom loggers (file logging, network logging, etc.)
///
/// # Example
///
/// ```no_run
/// use lumen_3d_engine::lumen3d::log::{Logger, LogEntry};
///
/// struct NetworkLogger;
///
/// impl Logger for NetworkLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Send somewhere...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source component (e.g., "lumen3d::ResourceManager", "lumen3d::Material")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose debug information (typically disabled in release)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (potential issues)
    Warn,

    /// Error messages (critical issues with file:line details)
    Error,
}

impl LogSeverity {
    /// Parse a configuration level name ("INFO", "WARN", "ERROR", ...)
    ///
    /// Matching is case-insensitive. Returns None for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "TRACE" => Some(LogSeverity::Trace),
            "DEBUG" => Some(LogSeverity::Debug),
            "INFO" => Some(LogSeverity::Info),
            "WARN" | "WARNING" => Some(LogSeverity::Warn),
            "ERROR" => Some(LogSeverity::Error),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

fn format_timestamp(timestamp: SystemTime) -> String {
    let datetime: DateTime<Local> = timestamp.into();
    datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Default logger implementation using colored console output
///
/// Colors:
/// - Trace: bright black
/// - Debug: cyan
/// - Info: green
/// - Warn: yellow
/// - Error: red + bold
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let timestamp = format_timestamp(entry.timestamp);

        let severity_str = match entry.severity {
            LogSeverity::Trace => entry.severity.label().bright_black(),
            LogSeverity::Debug => entry.severity.label().cyan(),
            LogSeverity::Info => entry.severity.label().green(),
            LogSeverity::Warn => entry.severity.label().yellow(),
            LogSeverity::Error => entry.severity.label().red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            );
        } else {
            println!("[{}] [{}] [{}] {}", timestamp, severity_str, source, entry.message);
        }
    }
}

/// Plain-text logger appending to a file
///
/// Uses the same layout as `DefaultLogger`, without colors.
pub struct FileLogger {
    file: Mutex<File>,
}

impl FileLogger {
    /// Open (or create) the log file in append mode
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Mutex::new(file) })
    }
}

impl Logger for FileLogger {
    fn log(&self, entry: &LogEntry) {
        let timestamp = format_timestamp(entry.timestamp);
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        // A failing sink must never take the engine down.
        let _ = match (entry.file, entry.line) {
            (Some(src), Some(line)) => writeln!(
                file,
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, entry.severity.label(), entry.source, entry.message, src, line
            ),
            _ => writeln!(
                file,
                "[{}] [{}] [{}] {}",
                timestamp, entry.severity.label(), entry.source, entry.message
            ),
        };
    }
}

/// Forwards every entry to several loggers, in order
pub struct CompositeLogger {
    loggers: Vec<Box<dyn Logger>>,
}

impl CompositeLogger {
    pub fn new(loggers: Vec<Box<dyn Logger>>) -> Self {
        Self { loggers }
    }
}

impl Logger for CompositeLogger {
    fn log(&self, entry: &LogEntry) {
        for logger in &self.loggers {
            logger.log(entry);
        }
    }
}

// ===== LOG HANDLE =====

/// Cloneable handle to a logger plus a minimum severity
///
/// Every component that logs receives one of these at construction time.
/// Entries below the minimum severity are dropped before reaching the logger;
/// errors always pass.
#[derive(Clone)]
pub struct Log {
    logger: Arc<dyn Logger>,
    level: LogSeverity,
}

impl Log {
    /// Create a log handle around a logger
    pub fn new<L: Logger + 'static>(logger: L, level: LogSeverity) -> Self {
        Self { logger: Arc::new(logger), level }
    }

    /// Create a log handle around an already shared logger
    pub fn from_shared(logger: Arc<dyn Logger>, level: LogSeverity) -> Self {
        Self { logger, level }
    }

    /// Colored console log (DefaultLogger)
    pub fn console(level: LogSeverity) -> Self {
        Self::new(DefaultLogger, level)
    }

    /// Minimum severity forwarded to the logger
    pub fn level(&self) -> LogSeverity {
        self.level
    }

    /// Change the minimum severity
    pub fn set_level(&mut self, level: LogSeverity) {
        self.level = level;
    }

    /// Whether entries of this severity reach the logger
    pub fn enabled(&self, severity: LogSeverity) -> bool {
        severity >= self.level
    }

    /// Log a message without file:line information
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(&self, severity: LogSeverity, source: &str, message: String) {
        if !self.enabled(severity) {
            return;
        }
        self.logger.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }

    /// Log a message with file:line information (ERROR logs)
    pub fn log_detailed(
        &self,
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if !self.enabled(severity) {
            return;
        }
        self.logger.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::console(LogSeverity::Warn)
    }
}

impl std::fmt::Debug for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Log").field("level", &self.level).finish()
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, typically disabled)
///
/// # Example
///
/// ```ignore
/// engine_trace!(self.log, "lumen3d::ResourceManager", "Entering load_resource()");
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($log:expr, $source:expr, $($arg:tt)*) => {
        $log.log($crate::lumen3d::log::LogSeverity::Trace, $source, format!($($arg)*))
    };
}

/// Log a DEBUG message (development information)
#[macro_export]
macro_rules! engine_debug {
    ($log:expr, $source:expr, $($arg:tt)*) => {
        $log.log($crate::lumen3d::log::LogSeverity::Debug, $source, format!($($arg)*))
    };
}

/// Log an INFO message (important events)
///
/// # Example
///
/// ```ignore
/// engine_info!(self.log, "lumen3d::ResourceManager", "Loading Texture \"{}\"", name);
/// ```
#[macro_export]
macro_rules! engine_info {
    ($log:expr, $source:expr, $($arg:tt)*) => {
        $log.log($crate::lumen3d::log::LogSeverity::Info, $source, format!($($arg)*))
    };
}

/// Log a WARN message (potential issues)
#[macro_export]
macro_rules! engine_warn {
    ($log:expr, $source:expr, $($arg:tt)*) => {
        $log.log($crate::lumen3d::log::LogSeverity::Warn, $source, format!($($arg)*))
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! engine_error {
    ($log:expr, $source:expr, $($arg:tt)*) => {
        $log.log_detailed(
            $crate::lumen3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an `Error` (with file:line) and evaluate to it
///
/// # Example
///
/// ```ignore
/// let key = self.cache.get(name)
///     .ok_or_else(|| engine_err!(self.log, "lumen3d::ResourceManager",
///         Error::NotLoaded(name.to_string())))?;
/// ```
#[macro_export]
macro_rules! engine_err {
    ($log:expr, $source:expr, $err:expr) => {{
        let err: $crate::lumen3d::Error = $err;
        $log.log_detailed(
            $crate::lumen3d::log::LogSeverity::Error,
            $source,
            err.to_string(),
            file!(),
            line!()
        );
        err
    }};
}

/// Log an `Error` (with file:line) and return it from the current function
#[macro_export]
macro_rules! engine_bail {
    ($log:expr, $source:expr, $err:expr) => {
        return Err($crate::engine_err!($log, $source, $err))
    };
}

// ===== TEST SUPPORT =====

/// Logger collecting entries in memory (tests only)
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

#[cfg(test)]
impl CaptureLogger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Log handle forwarding everything (Trace and up) to this capture
    pub(crate) fn handle(&self) -> Log {
        Log::new(self.clone(), LogSeverity::Trace)
    }

    pub(crate) fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Messages of the given severity
    pub(crate) fn messages(&self, severity: LogSeverity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.severity == severity)
            .map(|e| e.message)
            .collect()
    }

    /// Whether an entry of this severity mentions `needle`
    pub(crate) fn contains(&self, severity: LogSeverity, needle: &str) -> bool {
        self.messages(severity).iter().any(|m| m.contains(needle))
    }
}

#[cfg(test)]
impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
