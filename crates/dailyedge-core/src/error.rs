//! Core error types for dailyedge-core.
//!
//! Validation failures are ordinary values handed back to the view; storage
//! and configuration failures carry enough context to be logged.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dailyedge-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Snapshot backend errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value backend errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Backend refused the write (quota, read-only medium, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown IANA timezone name
    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },
}

/// Validation failures reported back to the caller.
///
/// The display strings are the inline messages a view shows next to the
/// offending input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter valid numbers (possible must be > 0).")]
    InvalidScore,

    #[error("Add at least one valid category.")]
    NoValidCategory,

    #[error("Please set weights or leave all blank for equal weighting.")]
    DegenerateWeights,

    #[error("Task text must not be empty.")]
    EmptyTaskText,

    #[error("Invalid category \"{input}\" (expected NAME:EARNED/POSSIBLE[@WEIGHT])")]
    MalformedCategory { input: String },

    #[error("Invalid date \"{input}\" (expected YYYY-MM-DD)")]
    InvalidDayKey { input: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
