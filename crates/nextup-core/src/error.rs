//! Core error types for nextup-core.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for nextup-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Duration parsing errors (strict mode)
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Countdown engine state errors
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

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

/// Duration codec errors. Only the strict parser produces these; the
/// default lenient parser never fails.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Input is not a 1-3 segment colon-separated numeric duration
    #[error("Invalid duration format: {input:?}")]
    InvalidFormat { input: String },
}

/// Countdown engine state errors. All are caller errors, never expected at
/// steady state.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Head removal attempted on an empty agenda
    #[error("Agenda is empty")]
    EmptyAgenda,

    /// start() called while the engine is already past Idle
    #[error("Countdown already started")]
    AlreadyStarted,
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

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No config directory available on this platform
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
