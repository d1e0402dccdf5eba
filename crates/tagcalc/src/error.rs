//! Error types for the calculator widget
//!
//! Arithmetic itself never fails (IEEE-754 results flow to the display
//! verbatim); errors only come from persistence and configuration.

use thiserror::Error;

/// Result type for widget operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a key-value store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error for key `{key}`: {source}")]
    Io {
        /// Storage key being accessed
        key: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Stored blob is not valid JSON for the expected shape
    #[error("Malformed stored JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Key cannot be used by this backend
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Backend-specific failure (e.g. browser storage quota)
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create an I/O error for a key
    #[must_use]
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }

    /// Create a backend error
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config parsed but holds unusable values
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// What is wrong
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid-configuration error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum CalcError {
    /// Persistence failure
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration failure
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
