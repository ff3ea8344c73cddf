//! Defines the error types for option parsing, resolution and drawing.

use autotable_style::StyleError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or resolving a configuration layer.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Options must be an object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("Invalid type for option '{key}': expected {expected}, got {found}")]
    InvalidType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid value for option '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid style in '{key}': {source}")]
    Style {
        key: String,
        #[source]
        source: StyleError,
    },

    #[error("Hook '{key}' cannot be set from data; register it with the typed options API")]
    HookNotCallable { key: String },

    #[error("Unsupported call arguments: {0}")]
    CallArguments(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read options from '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid_type(
        key: impl Into<String>,
        expected: &'static str,
        value: &serde_json::Value,
    ) -> Self {
        ConfigError::InvalidType {
            key: key.into(),
            expected,
            found: autotable_style::value_kind(value),
        }
    }

    pub(crate) fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// The option key the error refers to, when there is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidType { key, .. }
            | ConfigError::InvalidValue { key, .. }
            | ConfigError::Style { key, .. }
            | ConfigError::HookNotCallable { key } => Some(key),
            _ => None,
        }
    }
}

/// Errors reported by a drawing engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Table has no content: set head, body, foot, columns or html")]
    NoContent,

    #[error("Table does not fit: {0}")]
    DoesNotFit(String),

    #[error("Drawing failed: {0}")]
    Draw(String),
}

/// The main error enum for high-level table operations.
#[derive(Error, Debug)]
pub enum AutoTableError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}
