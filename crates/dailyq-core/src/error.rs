//! Core error types for dailyq-core.
//!
//! This module defines the error hierarchy using thiserror. The day-keyed
//! store operations deliberately absorb their failures (a local cache has
//! no consistency requirement); these types cover the fallible paths:
//! opening the store, configuration, and prompt generation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dailyq-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Prompt-generation errors
    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

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

/// Record-store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Store migration failed: {0}")]
    MigrationFailed(String),

    /// Store database is locked
    #[error("Store is locked")]
    Locked,

    /// A record collection could not be encoded for storage
    #[error("Record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The data directory could not be created
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors.
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

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Prompt-provider errors.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The configured endpoint is not a valid URL
    #[error("Invalid prompt endpoint: {0}")]
    InvalidEndpoint(String),

    /// HTTP transport or body-decoding failure
    #[error("Prompt request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Prompt endpoint returned HTTP {status}")]
    Api { status: u16 },

    /// The endpoint answered but produced no usable text
    #[error("Prompt endpoint returned an empty completion")]
    EmptyResponse,

    /// A blocking runtime could not be created
    #[error("Runtime error: {0}")]
    Runtime(#[source] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
