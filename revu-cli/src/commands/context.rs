//! Context command - Print the context excerpt for a local file and patch

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use revu_core::{extract_context_from_text, Config};

/// Arguments for the context command
#[derive(Args, Debug)]
pub struct ContextArgs {
    /// File content at the new revision
    #[arg(required = true)]
    pub file: PathBuf,

    /// Unified diff for that file (as served by the GitHub files API)
    #[arg(required = true)]
    pub patch: PathBuf,

    /// Lines of context on each side of an added line
    #[arg(short = 'c', long)]
    pub context_lines: Option<usize>,
}

impl ContextArgs {
    /// Execute the context command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let patch = std::fs::read_to_string(&self.patch)
            .with_context(|| format!("Failed to read {}", self.patch.display()))?;

        let radius = self.context_lines.unwrap_or(config.review.context_lines);
        tracing::debug!(file = %self.file.display(), radius, "Extracting context");

        let excerpt = extract_context_from_text(&content, &patch, radius);
        if excerpt.is_empty() {
            println!("(no additions - empty excerpt)");
        } else {
            println!("{}", excerpt);
        }

        Ok(())
    }
}
