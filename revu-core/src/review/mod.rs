//! Review module for pull request reviews
//!
//! This module connects the diff context extractor to a language model and a
//! code-hosting platform. Each changed file is analysed independently; the
//! coordinator fans the analyses out, joins them, and posts the results.

pub mod coordinator;
pub mod host;
pub mod model;
pub mod prompt;
pub mod types;

pub use coordinator::{analyze_file, generate_summary, ReviewCoordinator, ReviewOptions};
pub use host::PullRequestHost;
pub use model::{AnthropicModel, ReviewModel};
pub use prompt::FileReviewPrompt;
pub use types::{
    FileAnalysis, FileDiff, FileStatus, PullRequestDetails, ReviewReport, SkippedFile,
};
