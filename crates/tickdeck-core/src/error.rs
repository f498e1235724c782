//! Error types for tickdeck-core.
//!
//! The reducer itself never fails; errors live at the boundaries
//! (input validation, storage, configuration).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for tickdeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to write configuration to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(String),

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Rejections raised at the command boundary, before a command is
/// constructed. The transition function trusts its input and never
/// validates.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("timer name must not be empty")]
    EmptyName,

    #[error("timer duration must be a positive number of seconds, got {value}")]
    InvalidDuration { value: u64 },
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
