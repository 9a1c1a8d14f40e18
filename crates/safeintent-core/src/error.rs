//! Error types for SafeIntent Core.
//!
//! Guarded accessors never return these. They cover configuration and
//! payload loading only.

use thiserror::Error;

/// Core error type for loading configuration and payloads.
#[derive(Debug, Error)]
pub enum SafeIntentError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML.
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Intent payload envelope is not valid JSON.
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),
}
