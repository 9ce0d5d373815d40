//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),

    /// Pull request not found
    #[error("Pull request #{0} not found")]
    PrNotFound(u64),

    /// File content could not be fetched
    #[error("Unable to get content for {path} at {git_ref}")]
    ContentNotFound { path: String, git_ref: String },

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<Error> for revu_core::Error {
    fn from(err: Error) -> Self {
        revu_core::Error::Host(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_core_error() {
        let err: revu_core::Error = Error::PrNotFound(12).into();
        assert!(matches!(err, revu_core::Error::Host(_)));
        assert_eq!(err.to_string(), "Host error: Pull request #12 not found");
    }

    #[test]
    fn test_content_not_found_message() {
        let err = Error::ContentNotFound {
            path: "src/lib.rs".to_string(),
            git_ref: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Unable to get content for src/lib.rs at abc");
    }
}
