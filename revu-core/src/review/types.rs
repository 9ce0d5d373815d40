//! Data exchanged between the host, the model and the coordinator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Change status of a file in a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    /// Copied, changed, unchanged, or anything newer
    Other,
}

impl FileStatus {
    /// Map the hosting platform's status string
    pub fn parse(status: &str) -> Self {
        match status {
            "added" => FileStatus::Added,
            "modified" => FileStatus::Modified,
            "removed" => FileStatus::Removed,
            "renamed" => FileStatus::Renamed,
            _ => FileStatus::Other,
        }
    }
}

/// A changed file as reported by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDiff {
    /// Path relative to the repository root
    pub filename: String,
    /// Change status
    pub status: FileStatus,
    /// Unified diff for this file; empty for binary or oversized files
    pub patch: String,
}

impl FileDiff {
    pub fn new(filename: impl Into<String>, status: FileStatus, patch: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            status,
            patch: patch.into(),
        }
    }

    /// Why this file cannot be reviewed, if it can't
    pub fn skip_reason(&self) -> Option<&'static str> {
        if self.status == FileStatus::Removed {
            Some("file removed")
        } else if self.patch.trim().is_empty() {
            Some("no patch available")
        } else {
            None
        }
    }
}

/// Pull request metadata needed for a review run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestDetails {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Author login
    pub author: String,
    /// Current description
    pub body: String,
    /// Whether the PR is a draft
    pub draft: bool,
    /// Head commit SHA; file contents are fetched at this revision
    pub head_sha: String,
}

/// Review feedback for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub filename: String,
    pub patch: String,
    pub feedback: String,
}

impl FileAnalysis {
    /// Markdown body of the PR comment for this file
    pub fn to_comment(&self) -> String {
        format!(
            "### {}\n\n```diff\n{}\n```\n\n{}\n\n",
            self.filename, self.patch, self.feedback
        )
    }
}

/// A file that was not reviewed, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}

/// Outcome of one review run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport {
    /// PR number
    pub pr_number: u64,
    /// Successful analyses, in changed-file order
    pub analyses: Vec<FileAnalysis>,
    /// Files not sent to the model
    pub skipped: Vec<SkippedFile>,
    /// Files whose fetch or model call failed
    pub failed: Vec<SkippedFile>,
    /// Summary appended to the description, if one was generated
    pub summary: Option<String>,
    /// Number of comments posted
    pub comments_posted: usize,
    /// The PR was a draft and nothing was reviewed
    pub draft_skipped: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ReviewReport {
    /// Whether every reviewable file was analysed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Wall-clock duration of the run
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_status_parse() {
        assert_eq!(FileStatus::parse("added"), FileStatus::Added);
        assert_eq!(FileStatus::parse("removed"), FileStatus::Removed);
        assert_eq!(FileStatus::parse("copied"), FileStatus::Other);
    }

    #[test]
    fn test_skip_reason() {
        let removed = FileDiff::new("a.rs", FileStatus::Removed, "@@ -1,1 +0,0 @@\n-x");
        assert_eq!(removed.skip_reason(), Some("file removed"));

        let binary = FileDiff::new("logo.png", FileStatus::Modified, "");
        assert_eq!(binary.skip_reason(), Some("no patch available"));

        let modified = FileDiff::new("b.rs", FileStatus::Modified, "@@ -1,1 +1,1 @@\n-x\n+y");
        assert_eq!(modified.skip_reason(), None);
    }

    #[test]
    fn test_comment_format() {
        let analysis = FileAnalysis {
            filename: "src/lib.rs".to_string(),
            patch: "+fn x() {}".to_string(),
            feedback: "Looks good, thanks @dev!".to_string(),
        };
        assert_eq!(
            analysis.to_comment(),
            "### src/lib.rs\n\n```diff\n+fn x() {}\n```\n\nLooks good, thanks @dev!\n\n"
        );
    }
}
