//! revu core - diff context extraction and review orchestration
//!
//! This crate derives a bounded excerpt of surrounding code for every line a
//! pull request adds, sends it to a language model together with the patch,
//! and coordinates posting the feedback back to the hosting platform.

pub mod config;
pub mod diff;
pub mod error;
pub mod review;
pub mod secrets;

pub use config::{Config, ConfigOverrides, ModelConfig, ReviewConfig};
pub use diff::{extract_context, extract_context_from_text, DEFAULT_CONTEXT_LINES};
pub use error::{Error, Result};
pub use review::{
    AnthropicModel, FileAnalysis, FileDiff, FileStatus, PullRequestDetails, PullRequestHost,
    ReviewCoordinator, ReviewModel, ReviewOptions, ReviewReport,
};
pub use secrets::Secrets;
