//! Error types for aqari.

use thiserror::Error;

/// Result type alias using aqari's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for aqari operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Property not found
    #[error("Property not found: {0}")]
    PropertyNotFound(uuid::Uuid),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// Room analysis failed (vision output missing or non-conforming).
    /// Hard failure: there is no safe degraded analysis result.
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Authentication/authorization failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
