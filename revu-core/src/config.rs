//! Configuration management for revu
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (REVU_*)
//! 3. Config file (~/.config/revu/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::diff::DEFAULT_CONTEXT_LINES;
use crate::{Error, Result};

/// Default Anthropic Messages API endpoint
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Default model used for reviews
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";

/// Review-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Lines of surrounding code captured on each side of an addition
    pub context_lines: usize,

    /// Upper bound on files analysed at the same time
    pub max_concurrency: usize,

    /// Append an AI summary to the pull request description
    pub summary: bool,

    /// Skip draft pull requests
    pub skip_drafts: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            max_concurrency: 8,
            summary: false,
            skip_drafts: true,
        }
    }
}

/// Language model configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier
    pub name: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens in a single response
    pub max_tokens: u32,

    /// Messages API endpoint
    pub api_url: String,

    /// Per-request timeout (e.g. "90s", "2m")
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            max_tokens: 4096,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Values supplied on the command line; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub context_lines: Option<usize>,
    pub max_concurrency: Option<usize>,
    pub summary: Option<bool>,
    pub skip_drafts: Option<bool>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Review configuration
    pub review: ReviewConfig,

    /// Model configuration
    pub model: ModelConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/revu/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("revu").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - REVU_MODEL: Model to use
    /// - REVU_CONTEXT_LINES: Context lines around each addition
    /// - REVU_MAX_CONCURRENCY: Files analysed in parallel
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("REVU_MODEL") {
            self.model.name = model;
        }

        if let Some(lines) = parse_env_usize("REVU_CONTEXT_LINES") {
            self.review.context_lines = lines;
        }

        if let Some(limit) = parse_env_usize("REVU_MAX_CONCURRENCY") {
            self.review.max_concurrency = limit;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(model) = overrides.model {
            self.model.name = model;
        }

        if let Some(lines) = overrides.context_lines {
            self.review.context_lines = lines;
        }

        if let Some(limit) = overrides.max_concurrency {
            self.review.max_concurrency = limit;
        }

        if let Some(summary) = overrides.summary {
            self.review.summary = summary;
        }

        if let Some(skip) = overrides.skip_drafts {
            self.review.skip_drafts = skip;
        }

        self
    }

    /// Check values that would make a review run impossible
    pub fn validate(&self) -> Result<()> {
        if self.review.max_concurrency == 0 {
            return Err(Error::Config(
                "review.max_concurrency must be at least 1".to_string(),
            ));
        }

        if self.model.max_tokens == 0 {
            return Err(Error::Config("model.max_tokens must be at least 1".to_string()));
        }

        if self.model.name.trim().is_empty() {
            return Err(Error::Config("model.name must not be empty".to_string()));
        }

        Ok(())
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(overrides: ConfigOverrides) -> Result<Self> {
        let config = Self::load()?
            .with_env_overrides()
            .with_cli_overrides(overrides);
        config.validate()?;
        Ok(config)
    }
}

fn parse_env_usize(var: &str) -> Option<usize> {
    let value = std::env::var(var).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(var, value = %value, "Ignoring non-numeric environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.review.context_lines, 3);
        assert_eq!(config.review.max_concurrency, 8);
        assert!(!config.review.summary);
        assert!(config.review.skip_drafts);
        assert_eq!(config.model.name, DEFAULT_MODEL);
        assert_eq!(config.model.timeout, Duration::from_secs(120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(ConfigOverrides {
            model: Some("claude-3-opus-latest".to_string()),
            context_lines: Some(5),
            summary: Some(true),
            ..Default::default()
        });

        assert_eq!(config.model.name, "claude-3-opus-latest");
        assert_eq!(config.review.context_lines, 5);
        assert!(config.review.summary);
        // untouched values keep their defaults
        assert_eq!(config.review.max_concurrency, 8);
        assert!(config.review.skip_drafts);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[review]
context_lines = 6
max_concurrency = 2
summary = true

[model]
name = "claude-3-5-haiku-latest"
temperature = 0.3
timeout = "45s"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.review.context_lines, 6);
        assert_eq!(config.review.max_concurrency, 2);
        assert!(config.review.summary);
        assert_eq!(config.model.name, "claude-3-5-haiku-latest");
        assert!((config.model.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.model.timeout, Duration::from_secs(45));
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[model]
name = "opus"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.model.name, "opus");
        assert_eq!(config.model.api_url, DEFAULT_API_URL);
        assert_eq!(config.review.context_lines, 3);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[review]\ncontext_lines = 1").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.review.context_lines, 1);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[review]\ncontext_lines = \"many\"").unwrap();

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = Config::default().with_cli_overrides(ConfigOverrides {
            max_concurrency: Some(0),
            ..Default::default()
        });
        assert!(config.validate().is_err());
    }
}
