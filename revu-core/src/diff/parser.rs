//! Unified diff line classification
//!
//! Patches arrive pre-computed from the hosting platform, one per file. This
//! module only classifies their lines; it never validates hunk counts or
//! checks that a patch is well formed.

use std::sync::LazyLock;

use regex::Regex;

/// Hunk header as emitted by the hosting platform: `@@ -12,7 +12,9 @@`.
///
/// Only the old-file start line is captured.
static HUNK_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+),\d+ \+\d+,\d+ @@").expect("HUNK_HEADER_RE regex should compile")
});

/// A single patch line tagged with its role in the diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// `@@ ... @@` line. `None` when the header did not match the expected
    /// shape, in which case the cursor must be left alone.
    HunkHeader(Option<usize>),
    /// Line present only in the old file
    Removal(&'a str),
    /// Line present only in the new file
    Addition(&'a str),
    /// Line present in both files (or anything unrecognised)
    Context(&'a str),
}

impl<'a> DiffLine<'a> {
    /// Classify one raw patch line
    pub fn classify(line: &'a str) -> Self {
        if line.starts_with("@@") {
            DiffLine::HunkHeader(parse_old_start(line))
        } else if let Some(rest) = line.strip_prefix('-') {
            DiffLine::Removal(rest)
        } else if let Some(rest) = line.strip_prefix('+') {
            DiffLine::Addition(rest)
        } else {
            DiffLine::Context(line.strip_prefix(' ').unwrap_or(line))
        }
    }

    /// Whether this line occupies a position in the old file's numbering
    pub fn consumes_old_line(&self) -> bool {
        matches!(self, DiffLine::Removal(_) | DiffLine::Context(_))
    }

    pub fn is_addition(&self) -> bool {
        matches!(self, DiffLine::Addition(_))
    }
}

/// Extract `oldStart` from a hunk header, or `None` if it is malformed
pub fn parse_old_start(line: &str) -> Option<usize> {
    HUNK_HEADER_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Classify every line of a patch, in order
pub fn parse_patch<S: AsRef<str>>(patch: &[S]) -> Vec<DiffLine<'_>> {
    patch
        .iter()
        .map(|line| DiffLine::classify(line.as_ref()))
        .collect()
}
