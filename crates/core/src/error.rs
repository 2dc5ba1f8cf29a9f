//! Error types for Sandbox Connect.

use thiserror::Error;

/// Result type alias using Sandbox Connect's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Sandbox Connect.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Request Errors
    // =========================================================================
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Password decoding failed: {0}")]
    PasswordDecode(String),

    // =========================================================================
    // Collaborator Errors
    // =========================================================================
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Source control error: {0}")]
    SourceControl(String),

    #[error("Shell error: {0}")]
    Shell(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a password decoding error.
    pub fn password_decode(msg: impl Into<String>) -> Self {
        Self::PasswordDecode(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a source control error.
    pub fn source_control(msg: impl Into<String>) -> Self {
        Self::SourceControl(msg.into())
    }

    /// Create a shell error.
    pub fn shell(msg: impl Into<String>) -> Self {
        Self::Shell(msg.into())
    }

    /// Create a prompt error.
    pub fn prompt(msg: impl Into<String>) -> Self {
        Self::Prompt(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
