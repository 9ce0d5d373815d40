//! Pull request reading and commenting

use crate::{Error, GitHubClient, Result};
use async_trait::async_trait;
use octocrab::models::pulls::PullRequest as OctocrabPR;
use revu_core::review::{FileDiff, FileStatus, PullRequestDetails, PullRequestHost};
use tracing::{debug, info};

fn pull_request_details(pr: OctocrabPR) -> PullRequestDetails {
    PullRequestDetails {
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        author: pr.user.map(|u| u.login).unwrap_or_default(),
        body: pr.body.unwrap_or_default(),
        draft: pr.draft.unwrap_or(false),
        head_sha: pr.head.sha,
    }
}

/// Map octocrab's diff status onto ours through its serialized name
fn file_status<T: serde::Serialize>(status: &T) -> FileStatus {
    serde_json::to_value(status)
        .ok()
        .and_then(|v| v.as_str().map(FileStatus::parse))
        .unwrap_or(FileStatus::Other)
}

fn not_found(e: &octocrab::Error) -> bool {
    matches!(e, octocrab::Error::GitHub { source, .. } if source.message.contains("Not Found"))
}

impl GitHubClient {
    /// Get a pull request by number
    pub async fn get_pull_request(&self, number: u64) -> Result<PullRequestDetails> {
        debug!(number, "Fetching pull request");

        let pr = self
            .client()
            .pulls(self.owner(), self.repo())
            .get(number)
            .await
            .map_err(|e| {
                if not_found(&e) {
                    Error::PrNotFound(number)
                } else {
                    Error::Api(e)
                }
            })?;

        Ok(pull_request_details(pr))
    }

    /// List all files changed by a pull request, following pagination
    pub async fn list_changed_files(&self, number: u64) -> Result<Vec<FileDiff>> {
        debug!(number, "Listing changed files");

        let first_page = self
            .client()
            .pulls(self.owner(), self.repo())
            .list_files(number)
            .await
            .map_err(|e| {
                if not_found(&e) {
                    Error::PrNotFound(number)
                } else {
                    Error::Api(e)
                }
            })?;

        let entries = self.client().all_pages(first_page).await?;

        let files: Vec<FileDiff> = entries
            .into_iter()
            .map(|entry| FileDiff {
                status: file_status(&entry.status),
                filename: entry.filename,
                patch: entry.patch.unwrap_or_default(),
            })
            .collect();

        info!(number, count = files.len(), "Fetched changed files");

        Ok(files)
    }

    /// Fetch a file's decoded content at a given ref
    pub async fn get_file_content(&self, path: &str, git_ref: &str) -> Result<String> {
        debug!(path, git_ref, "Fetching file content");

        let content_not_found = || Error::ContentNotFound {
            path: path.to_string(),
            git_ref: git_ref.to_string(),
        };

        let mut items = self
            .client()
            .repos(self.owner(), self.repo())
            .get_content()
            .path(path)
            .r#ref(git_ref)
            .send()
            .await
            .map_err(|e| {
                if not_found(&e) {
                    content_not_found()
                } else {
                    Error::Api(e)
                }
            })?;

        // A directory listing has several items and no inline content
        items
            .take_items()
            .into_iter()
            .next()
            .and_then(|item| item.decoded_content())
            .ok_or_else(content_not_found)
    }

    /// Post a comment on a pull request's conversation
    pub async fn create_pr_comment(&self, number: u64, body: &str) -> Result<()> {
        debug!(number, len = body.len(), "Creating PR comment");

        self.client()
            .issues(self.owner(), self.repo())
            .create_comment(number, body)
            .await?;

        Ok(())
    }

    /// Replace a pull request's description
    pub async fn update_pr_body(&self, number: u64, body: &str) -> Result<()> {
        debug!(number, "Updating PR description");

        self.client()
            .issues(self.owner(), self.repo())
            .update(number)
            .body(body)
            .send()
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PullRequestHost for GitHubClient {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn pull_request(&self, number: u64) -> revu_core::Result<PullRequestDetails> {
        Ok(self.get_pull_request(number).await?)
    }

    async fn changed_files(&self, number: u64) -> revu_core::Result<Vec<FileDiff>> {
        Ok(self.list_changed_files(number).await?)
    }

    async fn file_content(&self, path: &str, git_ref: &str) -> revu_core::Result<String> {
        Ok(self.get_file_content(path, git_ref).await?)
    }

    async fn post_comment(&self, number: u64, body: &str) -> revu_core::Result<()> {
        Ok(self.create_pr_comment(number, body).await?)
    }

    async fn update_description(&self, number: u64, body: &str) -> revu_core::Result<()> {
        Ok(self.update_pr_body(number, body).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Status {
        Added,
        Removed,
        Copied,
    }

    #[test]
    fn test_file_status_from_serialized_name() {
        assert_eq!(file_status(&Status::Added), FileStatus::Added);
        assert_eq!(file_status(&Status::Removed), FileStatus::Removed);
        assert_eq!(file_status(&Status::Copied), FileStatus::Other);
        assert_eq!(file_status(&"modified"), FileStatus::Modified);
        assert_eq!(file_status(&3), FileStatus::Other);
    }
}
