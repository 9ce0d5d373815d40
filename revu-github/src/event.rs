//! GitHub Actions run context
//!
//! When running inside a workflow triggered by a `pull_request` event, the
//! runner exposes the repository in `GITHUB_REPOSITORY` and the full webhook
//! payload in the file named by `GITHUB_EVENT_PATH`.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::client::parse_github_url;
use crate::{Error, Result};

/// Repository and pull request the current workflow run is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
    #[serde(default)]
    number: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
}

impl ActionContext {
    /// Read the context from the Actions runner environment
    pub fn from_env() -> Result<Self> {
        let repository = env_var("GITHUB_REPOSITORY")?;
        let event_path = env_var("GITHUB_EVENT_PATH")?;
        Self::from_event_file(&repository, Path::new(&event_path))
    }

    /// Build the context from a repository slug and an event payload file
    pub fn from_event_file(repository: &str, path: &Path) -> Result<Self> {
        let payload = std::fs::read_to_string(path).map_err(|e| {
            Error::Other(format!(
                "Failed to read event payload {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_payload(repository, &payload)
    }

    /// Build the context from a repository slug and an event payload
    pub fn from_payload(repository: &str, payload: &str) -> Result<Self> {
        let (owner, repo) = parse_github_url(repository)?;

        let event: EventPayload = serde_json::from_str(payload)
            .map_err(|e| Error::Parse(format!("Invalid event payload: {}", e)))?;

        let pr_number = event
            .pull_request
            .map(|pr| pr.number)
            .or(event.number)
            .ok_or_else(|| {
                Error::Other("Event payload does not describe a pull request".to_string())
            })?;

        debug!(owner = %owner, repo = %repo, pr_number, "Resolved Actions context");

        Ok(Self {
            owner,
            repo,
            pr_number,
        })
    }
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::MissingEnv(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_pull_request_event() {
        let payload = r#"{"action": "opened", "number": 5, "pull_request": {"number": 5, "draft": false}}"#;
        let ctx = ActionContext::from_payload("octo/widgets", payload).unwrap();
        assert_eq!(
            ctx,
            ActionContext {
                owner: "octo".to_string(),
                repo: "widgets".to_string(),
                pr_number: 5,
            }
        );
    }

    #[test]
    fn test_top_level_number_fallback() {
        let ctx = ActionContext::from_payload("octo/widgets", r#"{"number": 17}"#).unwrap();
        assert_eq!(ctx.pr_number, 17);
    }

    #[test]
    fn test_non_pr_event_rejected() {
        let err = ActionContext::from_payload("octo/widgets", r#"{"ref": "refs/heads/main"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("does not describe a pull request"));
    }

    #[test]
    fn test_invalid_payload() {
        assert!(matches!(
            ActionContext::from_payload("octo/widgets", "not json"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_from_event_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"pull_request": {{"number": 99}}}}"#).unwrap();

        let ctx = ActionContext::from_event_file("octo/widgets", file.path()).unwrap();
        assert_eq!(ctx.pr_number, 99);
    }

    #[test]
    fn test_missing_env() {
        assert!(matches!(
            env_var("REVU_TEST_DEFINITELY_UNSET"),
            Err(Error::MissingEnv(name)) if name == "REVU_TEST_DEFINITELY_UNSET"
        ));
    }
}
