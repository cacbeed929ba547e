//! Engine configuration
//!
//! Read from a JSON file (`data/main.json` by convention). Every field is
//! optional:
//!
//! ```json
//! {
//!     "resource_path": "data/",
//!     "logging": { "level": "INFO", "file": "lumen3d.log" },
//!     "materials": ["common"],
//!     "scenes": ["room"],
//!     "shaders": "default"
//! }
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde::Deserialize;
use crate::error::{Error, Result};
use crate::log::LogSeverity;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "TRACE", "DEBUG", "INFO", "WARN" or "ERROR"
    pub level: String,
    /// Also append log entries to this file
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "WARN".to_string(), file: None }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Root of `textures/`, `meshes/`, `materials/`, `scenes/` and `shaders/`
    #[serde(alias = "resourcePath")]
    pub resource_path: PathBuf,
    pub logging: LoggingConfig,
    /// Material libraries loaded by `Engine::init_resources`
    pub materials: Vec<String>,
    /// Scene files registered by `Engine::init_resources`
    pub scenes: Vec<String>,
    /// Shader library loaded by `Engine::init_resources`
    pub shaders: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resource_path: PathBuf::from("data/"),
            logging: LoggingConfig::default(),
            materials: Vec::new(),
            scenes: Vec::new(),
            shaders: None,
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| Error::Io(format!("{}: {}", path.display(), err)))?;
        text.parse()
    }

    /// Configured minimum log severity, None if the level name is unknown
    pub fn log_severity(&self) -> Option<LogSeverity> {
        LogSeverity::from_name(&self.logging.level)
    }
}

impl FromStr for EngineConfig {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
