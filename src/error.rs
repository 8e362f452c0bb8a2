//! Error types for Thinkloop
//!
//! This module defines the application-level error enum, using `thiserror`
//! for ergonomic error handling. Tool failures have their own type in
//! [`crate::tools::ToolError`] because they are folded back into the
//! conversation instead of propagated.

use thiserror::Error;

/// Main error type for Thinkloop operations
///
/// Covers configuration loading, provider interactions, credential
/// resolution and the I/O performed by the interactive front end.
#[derive(Error, Debug)]
pub enum ThinkloopError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (HTTP status, malformed bodies, empty replies)
    #[error("Provider error: {0}")]
    Provider(String),

    /// No API key available for the requested or detected provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Tool registry errors (duplicate registration and similar)
    #[error("Tool registry error: {0}")]
    Tool(String),

    /// Line editor errors from the interactive chat
    #[error("Readline error: {0}")]
    Readline(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<rustyline::error::ReadlineError> for ThinkloopError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ThinkloopError::Readline(err.to_string())
    }
}

/// Result type alias for Thinkloop operations
///
/// Uses `anyhow::Error` so callers can attach context while still being able
/// to downcast to [`ThinkloopError`].
pub type Result<T> = anyhow::Result<T>;
