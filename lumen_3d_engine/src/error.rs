//! Error types for the Lumen3D engine
//!
//! This module defines the error types used throughout the engine,
//! including manifest registration, resource loading and the entity hierarchy.

use std::fmt;
use crate::resource::ResourceKind;

/// Result type for Lumen3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Lumen3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A resource, manifest or file name was empty
    EmptyName,

    /// A manifest with this name is already registered
    DuplicateManifest(String),

    /// No manifest is registered under this name
    ManifestNotFound(String),

    /// The manifest exists but describes another kind of resource
    KindMismatch {
        name: String,
        expected: ResourceKind,
        found: ResourceKind,
    },

    /// The resource is not cached or not currently loaded
    NotLoaded(String),

    /// The resource is loaded but nobody holds a reference to release
    Unreferenced(String),

    /// A manifest or manifest file carries malformed fields
    InvalidManifest(String),

    /// A required child resource failed to load
    DependencyFailed {
        resource: String,
        dependency: String,
    },

    /// Parent/child operation rejected (unknown entity, not a child, cycle)
    InvalidHierarchy(String),

    /// GPU-resource creation failed
    BackendError(String),

    /// File could not be read
    Io(String),

    /// File contents could not be parsed
    Parse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyName => write!(f, "Empty resource names not supported"),
            Error::DuplicateManifest(name) => write!(f, "Manifest '{}' already exists", name),
            Error::ManifestNotFound(name) => write!(f, "No manifest named '{}'", name),
            Error::KindMismatch { name, expected, found } => write!(
                f,
                "Manifest '{}' is a {:?}, expected a {:?}",
                name, found, expected
            ),
            Error::NotLoaded(name) => write!(f, "Resource '{}' is not loaded", name),
            Error::Unreferenced(name) => write!(f, "Resource '{}' has no reference to release", name),
            Error::InvalidManifest(msg) => write!(f, "Invalid manifest: {}", msg),
            Error::DependencyFailed { resource, dependency } => write!(
                f,
                "Resource '{}' failed to load dependency '{}'",
                resource, dependency
            ),
            Error::InvalidHierarchy(msg) => write!(f, "Invalid hierarchy: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
