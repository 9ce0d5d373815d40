//! Review command - Review a pull request and post feedback

use std::sync::Arc;

use anyhow::{anyhow, bail, Context as _};
use clap::Args;
use revu_core::{
    AnthropicModel, Config, ConfigOverrides, ReviewCoordinator, ReviewOptions, ReviewReport,
    Secrets,
};
use revu_github::{ActionContext, GitHubClient};

/// Arguments for the review command
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Repository (owner/repo or URL); defaults to GITHUB_REPOSITORY
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Pull request number; defaults to the Actions event payload
    #[arg(short, long)]
    pub pr: Option<u64>,

    /// Lines of context on each side of an added line
    #[arg(short = 'c', long, env = "REVU_CONTEXT_LINES")]
    pub context_lines: Option<usize>,

    /// Maximum number of files analysed at once
    #[arg(long, env = "REVU_MAX_CONCURRENCY")]
    pub max_concurrency: Option<usize>,

    /// Append an AI summary to the PR description
    #[arg(long)]
    pub summary: bool,

    /// Review draft pull requests too
    #[arg(long)]
    pub include_drafts: bool,

    /// Dry run - print feedback instead of posting it
    #[arg(long)]
    pub dry_run: bool,
}

impl ReviewArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            context_lines: self.context_lines,
            max_concurrency: self.max_concurrency,
            summary: self.summary.then_some(true),
            skip_drafts: self.include_drafts.then_some(false),
            ..Default::default()
        }
    }

    /// Resolve repository and PR number from flags, falling back to the
    /// Actions environment for whatever is missing
    fn target(&self) -> anyhow::Result<(GitHubClient, u64)> {
        match (&self.repo, self.pr) {
            (Some(repo), Some(pr)) => Ok((GitHubClient::from_url(repo)?, pr)),
            _ => {
                let ctx = ActionContext::from_env().context(
                    "Pass --repo and --pr, or run inside a pull_request GitHub Actions workflow",
                )?;
                let client = match &self.repo {
                    Some(repo) => GitHubClient::from_url(repo)?,
                    None => GitHubClient::new(ctx.owner, ctx.repo)?,
                };
                Ok((client, self.pr.unwrap_or(ctx.pr_number)))
            }
        }
    }

    /// Execute the review command
    pub async fn execute(&self, config: Config) -> anyhow::Result<()> {
        let config = config.with_cli_overrides(self.overrides());
        config.validate()?;

        let (client, pr) = self.target()?;

        tracing::info!(
            owner = %client.owner(),
            repo = %client.repo(),
            pr,
            context_lines = config.review.context_lines,
            dry_run = self.dry_run,
            "Starting revu review"
        );

        let api_key = Secrets::load()?.anthropic_api_key().ok_or_else(|| {
            anyhow!(
                "Anthropic API key not found. Set ANTHROPIC_API_KEY environment variable \
                 or add api_key to ~/.config/revu/secrets.toml"
            )
        })?;
        let model = AnthropicModel::new(config.model.clone(), api_key)?;

        let options = ReviewOptions::from(&config.review).with_dry_run(self.dry_run);
        let coordinator = ReviewCoordinator::new(Arc::new(client), Arc::new(model), options);

        let report = coordinator.run(pr).await?;
        print_report(&report, self.dry_run);

        if !report.is_complete() {
            bail!("{} file(s) could not be reviewed", report.failed.len());
        }

        Ok(())
    }
}

fn print_report(report: &ReviewReport, dry_run: bool) {
    println!("revu Review: PR #{}", report.pr_number);
    println!("===================");
    println!();

    if report.draft_skipped {
        println!("Draft pull request - skipped (use --include-drafts to review)");
        return;
    }

    if dry_run {
        for analysis in &report.analyses {
            println!("{}", analysis.to_comment());
        }
        if let Some(summary) = &report.summary {
            println!("## AI Summary");
            println!();
            println!("{}", summary);
            println!();
        }
    }

    println!("Reviewed: {}", report.analyses.len());
    for skipped in &report.skipped {
        println!("Skipped: {} ({})", skipped.filename, skipped.reason);
    }
    for failed in &report.failed {
        println!("Failed: {} ({})", failed.filename, failed.reason);
    }

    if dry_run {
        println!("[Dry run] Nothing was posted");
    } else {
        println!("Comments posted: {}", report.comments_posted);
    }
    println!(
        "Finished in {:.1}s",
        report.elapsed().num_milliseconds() as f64 / 1000.0
    );
}
