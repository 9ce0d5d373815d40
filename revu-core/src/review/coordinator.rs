//! Review coordinator for pull requests
//!
//! The coordinator runs the whole review of one pull request:
//! 1. Fetches PR metadata and the list of changed files
//! 2. Analyses every reviewable file concurrently (fetch content, extract
//!    context, ask the model)
//! 3. Waits for all analyses to finish
//! 4. Only then posts comments and the optional summary
//!
//! A failing file does not stop the others; it is reported in
//! [`ReviewReport::failed`].

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::ReviewConfig;
use crate::diff::extract_context_from_text;
use crate::{Error, Result};

use super::host::PullRequestHost;
use super::model::ReviewModel;
use super::prompt::{
    description_with_summary, summary_user_message, FileReviewPrompt, FILE_REVIEW_SYSTEM_PROMPT,
    SUMMARY_SYSTEM_PROMPT,
};
use super::types::{FileAnalysis, FileDiff, PullRequestDetails, ReviewReport, SkippedFile};

/// Options controlling a review run
#[derive(Debug, Clone)]
pub struct ReviewOptions {
    /// Lines captured on each side of an addition
    pub context_lines: usize,
    /// Maximum files analysed at once
    pub max_concurrency: usize,
    /// Generate and append a PR summary
    pub summary: bool,
    /// Leave draft PRs alone
    pub skip_drafts: bool,
    /// Analyse but do not post anything
    pub dry_run: bool,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self::from(&ReviewConfig::default())
    }
}

impl From<&ReviewConfig> for ReviewOptions {
    fn from(config: &ReviewConfig) -> Self {
        Self {
            context_lines: config.context_lines,
            max_concurrency: config.max_concurrency,
            summary: config.summary,
            skip_drafts: config.skip_drafts,
            dry_run: false,
        }
    }
}

impl ReviewOptions {
    /// Set dry run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Review one changed file: fetch its content at the head revision, build the
/// context excerpt and ask the model for feedback
pub async fn analyze_file(
    host: &dyn PullRequestHost,
    model: &dyn ReviewModel,
    pr: &PullRequestDetails,
    file: &FileDiff,
    context_lines: usize,
) -> Result<FileAnalysis> {
    debug!(filename = %file.filename, "Analysing file");

    let content = host.file_content(&file.filename, &pr.head_sha).await?;
    let context = extract_context_from_text(&content, &file.patch, context_lines);

    if context.is_empty() {
        debug!(filename = %file.filename, "No context excerpt for file");
    }

    let prompt = FileReviewPrompt {
        filename: &file.filename,
        patch: &file.patch,
        context: &context,
        author: Some(&pr.author),
    };

    let feedback = model
        .complete(FILE_REVIEW_SYSTEM_PROMPT, &prompt.to_user_message())
        .await?;

    Ok(FileAnalysis {
        filename: file.filename.clone(),
        patch: file.patch.clone(),
        feedback: feedback.trim().to_string(),
    })
}

/// Generate a bullet-point summary of all changes in a pull request
pub async fn generate_summary(model: &dyn ReviewModel, files: &[FileDiff]) -> Result<String> {
    let summary = model
        .complete(SUMMARY_SYSTEM_PROMPT, &summary_user_message(files))
        .await?;
    Ok(summary.trim().to_string())
}

/// Orchestrates a full pull request review
pub struct ReviewCoordinator {
    host: Arc<dyn PullRequestHost>,
    model: Arc<dyn ReviewModel>,
    options: ReviewOptions,
}

impl ReviewCoordinator {
    /// Create a new coordinator
    pub fn new(
        host: Arc<dyn PullRequestHost>,
        model: Arc<dyn ReviewModel>,
        options: ReviewOptions,
    ) -> Self {
        Self {
            host,
            model,
            options,
        }
    }

    /// Get the run options
    pub fn options(&self) -> &ReviewOptions {
        &self.options
    }

    /// Review pull request `number` and post the results
    pub async fn run(&self, number: u64) -> Result<ReviewReport> {
        let started_at = Utc::now();
        let pr = self.host.pull_request(number).await?;

        let mut report = ReviewReport {
            pr_number: number,
            analyses: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            summary: None,
            comments_posted: 0,
            draft_skipped: false,
            started_at,
            finished_at: started_at,
        };

        if pr.draft && self.options.skip_drafts {
            info!(pr = number, "Skipping draft pull request");
            report.draft_skipped = true;
            report.finished_at = Utc::now();
            return Ok(report);
        }

        let files = self.host.changed_files(number).await?;
        info!(
            pr = number,
            host = self.host.name(),
            model = self.model.name(),
            files = files.len(),
            "Starting review"
        );

        let mut reviewable = Vec::new();
        for file in &files {
            match file.skip_reason() {
                Some(reason) => {
                    debug!(filename = %file.filename, reason, "Skipping file");
                    report.skipped.push(SkippedFile {
                        filename: file.filename.clone(),
                        reason: reason.to_string(),
                    });
                }
                None => reviewable.push(file.clone()),
            }
        }

        let (analyses, failed) = self.analyze_all(&pr, &reviewable).await;
        report.analyses = analyses;
        report.failed = failed;

        if self.options.summary && !reviewable.is_empty() {
            match generate_summary(self.model.as_ref(), &reviewable).await {
                Ok(summary) => report.summary = Some(summary),
                Err(e) => warn!(pr = number, error = %e, "Failed to generate summary"),
            }
        }

        if self.options.dry_run {
            info!(pr = number, "[DRY RUN] Not posting review results");
        } else {
            report.comments_posted = self.publish(&pr, &report).await?;
        }

        report.finished_at = Utc::now();
        info!(
            pr = number,
            analysed = report.analyses.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Review finished"
        );

        Ok(report)
    }

    /// Analyse every file concurrently and wait for all of them.
    ///
    /// Results come back in the order of `files`.
    async fn analyze_all(
        &self,
        pr: &PullRequestDetails,
        files: &[FileDiff],
    ) -> (Vec<FileAnalysis>, Vec<SkippedFile>) {
        let permits = self
            .options
            .max_concurrency
            .clamp(1, Semaphore::MAX_PERMITS);
        let semaphore = Arc::new(Semaphore::new(permits));
        let pr = Arc::new(pr.clone());
        let mut join_set = JoinSet::new();

        for (index, file) in files.iter().enumerate() {
            let host = Arc::clone(&self.host);
            let model = Arc::clone(&self.model);
            let sem = Arc::clone(&semaphore);
            let pr = Arc::clone(&pr);
            let file = file.clone();
            let context_lines = self.options.context_lines;

            join_set.spawn(async move {
                let outcome = match sem.acquire_owned().await {
                    Ok(_permit) => {
                        analyze_file(host.as_ref(), model.as_ref(), &pr, &file, context_lines)
                            .await
                    }
                    Err(_) => Err(Error::Other("review limiter closed".to_string())),
                };
                (index, outcome)
            });
        }

        let mut outcomes: Vec<Option<Result<FileAnalysis>>> =
            files.iter().map(|_| None).collect();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(e) => warn!(error = %e, "Review task panicked"),
            }
        }

        let mut analyses = Vec::new();
        let mut failed = Vec::new();
        for (file, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Some(Ok(analysis)) => analyses.push(analysis),
                Some(Err(e)) => {
                    warn!(filename = %file.filename, error = %e, "Failed to analyse file");
                    failed.push(SkippedFile {
                        filename: file.filename.clone(),
                        reason: e.to_string(),
                    });
                }
                None => failed.push(SkippedFile {
                    filename: file.filename.clone(),
                    reason: "review task did not complete".to_string(),
                }),
            }
        }

        (analyses, failed)
    }

    /// Post one comment per analysed file, then the summary
    async fn publish(&self, pr: &PullRequestDetails, report: &ReviewReport) -> Result<usize> {
        let mut posted = 0;

        if report.analyses.is_empty() {
            info!(pr = pr.number, "No feedback to add to the PR");
        }

        for analysis in &report.analyses {
            self.host
                .post_comment(pr.number, &analysis.to_comment())
                .await?;
            posted += 1;
        }

        if let Some(summary) = &report.summary {
            let body = description_with_summary(&pr.body, summary);
            self.host.update_description(pr.number, &body).await?;
            info!(pr = pr.number, "Updated PR description with summary");
        }

        Ok(posted)
    }
}

impl std::fmt::Debug for ReviewCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewCoordinator")
            .field("host", &self.host.name())
            .field("model", &self.model.name())
            .field("options", &self.options)
            .finish()
    }
}
