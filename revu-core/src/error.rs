//! Error types for revu

use thiserror::Error;

/// Result type alias for revu operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for revu operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Language model request failed
    #[error("Model error: {0}")]
    Model(String),

    /// Code-hosting collaborator failed (fetching files, posting comments)
    #[error("Host error: {0}")]
    Host(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
