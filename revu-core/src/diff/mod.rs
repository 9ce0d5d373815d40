//! Diff module: unified diff parsing and context extraction
//!
//! This module turns a file's patch plus its full content into a compact
//! excerpt of the code surrounding each added line.

pub mod context;
pub mod parser;

pub use context::{extract_context, extract_context_from_text, Cursor, DEFAULT_CONTEXT_LINES};
pub use parser::{parse_old_start, parse_patch, DiffLine};
