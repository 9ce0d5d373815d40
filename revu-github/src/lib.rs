//! revu GitHub - GitHub integration for revu
//!
//! This crate provides GitHub API access for reading pull request metadata,
//! changed files and file contents, and for posting review comments.

mod client;
mod error;
mod event;
mod pr;

pub use client::GitHubClient;
pub use error::{Error, Result};
pub use event::ActionContext;
