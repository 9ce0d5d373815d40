//! Abstraction over the code-hosting platform

use async_trait::async_trait;

use crate::Result;

use super::types::{FileDiff, PullRequestDetails};

/// Read and write access to pull requests on a hosting platform
///
/// Implementations map their own failures into [`crate::Error::Host`].
#[async_trait]
pub trait PullRequestHost: Send + Sync {
    /// Get the name of this host
    fn name(&self) -> &'static str;

    /// Fetch pull request metadata
    async fn pull_request(&self, number: u64) -> Result<PullRequestDetails>;

    /// List every changed file with its patch
    async fn changed_files(&self, number: u64) -> Result<Vec<FileDiff>>;

    /// Fetch a file's full content at `git_ref`
    async fn file_content(&self, path: &str, git_ref: &str) -> Result<String>;

    /// Post a top-level comment on the pull request
    async fn post_comment(&self, number: u64, body: &str) -> Result<()>;

    /// Replace the pull request description
    async fn update_description(&self, number: u64, body: &str) -> Result<()>;
}
