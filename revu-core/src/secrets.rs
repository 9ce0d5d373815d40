//! Secrets management for revu
//!
//! Secrets are stored separately from configuration to avoid accidental sharing.
//! The secrets file is located at `~/.config/revu/secrets.toml` and must have
//! restrictive permissions (0600 on Unix).
//!
//! Loading priority:
//! 1. Environment variables (GITHUB_TOKEN, ANTHROPIC_API_KEY)
//! 2. Secrets file (~/.config/revu/secrets.toml)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// GitHub configuration
    pub github: GitHubSecrets,

    /// Anthropic configuration
    pub anthropic: AnthropicSecrets,
}

/// GitHub-related secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubSecrets {
    /// GitHub Personal Access Token
    pub token: Option<String>,
}

/// Anthropic-related secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AnthropicSecrets {
    /// Anthropic API key
    pub api_key: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        let secrets_path = Self::default_secrets_path();

        if let Some(path) = secrets_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &Path) -> Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let mode = metadata.permissions().mode();

            // Readable by group or others
            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }

            debug!(path = %path.display(), mode = format!("{:o}", mode & 0o777), "Secrets file permissions OK");
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        for value in [&mut secrets.github.token, &mut secrets.anthropic.api_key]
            .into_iter()
            .flatten()
        {
            *value = value.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/revu/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("revu").join("secrets.toml"))
    }

    /// Get GitHub token with environment variable override
    ///
    /// Priority: GITHUB_TOKEN env var > secrets file
    pub fn github_token(&self) -> Option<String> {
        resolve("GITHUB_TOKEN", self.github.token.as_deref())
    }

    /// Get the Anthropic API key with environment variable override
    ///
    /// Priority: ANTHROPIC_API_KEY env var > secrets file
    pub fn anthropic_api_key(&self) -> Option<String> {
        resolve("ANTHROPIC_API_KEY", self.anthropic.api_key.as_deref())
    }

    /// Create a template secrets file at the default location
    ///
    /// Creates parent directories if needed and sets secure permissions
    pub fn create_template() -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("Could not determine secrets path".to_string()))?;
        Self::create_template_at(&path)?;
        Ok(path)
    }

    /// Create a template secrets file at `path`, refusing to overwrite
    pub fn create_template_at(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        if path.exists() {
            return Err(Error::Config(format!(
                "Secrets file already exists at {}",
                path.display()
            )));
        }

        let template = r#"# revu secrets
# This file contains sensitive credentials - do not share or commit to version control
#
# IMPORTANT: This file must have restrictive permissions (chmod 600)

[github]
# GitHub Personal Access Token
# Required permissions: Pull requests read/write, Contents read
token = ""

[anthropic]
# Anthropic API key used for reviews and summaries
api_key = ""
"#;

        std::fs::write(path, template).map_err(Error::Io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms).map_err(Error::Io)?;
        }

        warn!(path = %path.display(), "Created secrets template - please edit and add your tokens");

        Ok(())
    }
}

fn resolve(env_var: &str, from_file: Option<&str>) -> Option<String> {
    if let Ok(value) = std::env::var(env_var) {
        let value = value.trim().to_string();
        if !value.is_empty() {
            debug!(env_var, "Using secret from environment variable");
            return Some(value);
        }
    }

    match from_file {
        Some(value) if !value.is_empty() => {
            debug!(env_var, "Using secret from secrets file");
            Some(value.to_string())
        }
        _ => None,
    }
}
