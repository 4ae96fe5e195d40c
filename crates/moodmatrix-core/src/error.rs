//! Core error types for moodmatrix-core.
//!
//! The ordering engine itself never fails. These errors cover the layers
//! around it: loading configuration and decoding task documents.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for moodmatrix-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task document decoding errors
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors raised while decoding a task document.
///
/// Individual malformed fields never produce an error; only a document whose
/// overall shape is wrong does.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Top-level value is not a JSON array
    #[error("Task document must be a JSON array, found {found}")]
    NotAnArray { found: &'static str },

    /// An element could not be read as a task record at all
    #[error("Task record #{index} is invalid: {message}")]
    InvalidRecord { index: usize, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<String> for CoreError {
    fn from(err: String) -> Self {
        CoreError::Custom(err)
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
