//! Context window extraction around added lines
//!
//! Given a file's full content at the head revision and the file's patch,
//! carve out a few lines of surrounding code for every addition. The result
//! gives the reviewer model some of the code around each change without
//! needing a checkout of the repository.

use std::ops::Range;

use super::parser::{parse_patch, DiffLine};

/// Default number of lines captured on each side of an addition
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Zero-based position in the old file's line numbering while scanning a patch.
///
/// Additions are treated as occupying the slot of the line they displace, so
/// the cursor advances for every added line too. This keeps windows centred
/// on the change but is not an exact old/new line mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(i64);

impl Cursor {
    /// Current position (may be -1 right after an `@@ -0,0 ...` header)
    pub fn position(&self) -> i64 {
        self.0
    }

    /// Re-seed from a hunk header's one-based `oldStart`
    pub fn seed(&mut self, old_start: usize) {
        self.0 = i64::try_from(old_start)
            .unwrap_or(i64::MAX)
            .saturating_sub(1);
    }

    pub fn advance(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Line range `[start, end)` of a `radius`-line window around the cursor,
    /// clamped to a file of `len` lines. Empty when the cursor has run past
    /// the end of the file.
    pub fn window(&self, radius: usize, len: usize) -> Range<usize> {
        let radius = i64::try_from(radius).unwrap_or(i64::MAX);
        let len = i64::try_from(len).unwrap_or(i64::MAX);

        let start = self.0.saturating_sub(radius).max(0);
        let end = self.0.saturating_add(radius).saturating_add(1).min(len);

        if end <= start {
            return 0..0;
        }
        // Both bounds lie in [0, len] here
        start as usize..end as usize
    }
}

/// Build the context excerpt for one file.
///
/// `file` is the full content split into lines, `patch` the unified diff
/// split into lines. Every `+` line contributes the slice of `file` within
/// `radius` lines of the cursor; blocks are separated by a blank line and
/// overlapping windows are repeated as-is. Leading and trailing whitespace is
/// trimmed from the result.
///
/// Never fails: malformed hunk headers leave the cursor where it was and
/// out-of-range windows are clamped. A patch without additions yields an
/// empty string.
pub fn extract_context<S, P>(file: &[S], patch: &[P], radius: usize) -> String
where
    S: AsRef<str>,
    P: AsRef<str>,
{
    let mut cursor = Cursor::default();
    let mut excerpt = String::new();

    for line in parse_patch(patch) {
        match line {
            DiffLine::HunkHeader(Some(old_start)) => cursor.seed(old_start),
            DiffLine::HunkHeader(None) => {}
            DiffLine::Addition(_) => {
                let window = cursor.window(radius, file.len());
                for (i, source_line) in file[window].iter().enumerate() {
                    if i > 0 {
                        excerpt.push('\n');
                    }
                    excerpt.push_str(source_line.as_ref());
                }
                excerpt.push_str("\n\n");
                cursor.advance();
            }
            DiffLine::Removal(_) | DiffLine::Context(_) => cursor.advance(),
        }
    }

    excerpt.trim().to_string()
}

/// [`extract_context`] over raw text, splitting both inputs on `\n`
pub fn extract_context_from_text(content: &str, patch: &str, radius: usize) -> String {
    let file: Vec<&str> = content.split('\n').collect();
    let patch: Vec<&str> = patch.split('\n').collect();
    extract_context(&file, &patch, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: [&str; 5] = ["a", "b", "c", "d", "e"];

    #[test]
    fn test_empty_patch() {
        let patch: [&str; 0] = [];
        assert_eq!(extract_context(&FILE, &patch, 3), "");
    }

    #[test]
    fn test_no_additions() {
        let patch = ["@@ -1,3 +1,2 @@", " a", "-b", " c"];
        assert_eq!(extract_context(&FILE, &patch, 3), "");
    }

    #[test]
    fn test_addition_after_header() {
        let patch = ["@@ -2,1 +2,2 @@", "+X"];
        assert_eq!(extract_context(&FILE, &patch, 1), "a\nb\nc");
    }

    #[test]
    fn test_removal_advances_cursor() {
        let patch = ["@@ -1,1 +1,1 @@", "-a", "+Z"];
        assert_eq!(extract_context(&FILE, &patch, 1), "a\nb\nc");
    }

    #[test]
    fn test_addition_at_last_line() {
        let patch = ["@@ -5,1 +5,2 @@", "+X"];
        assert_eq!(extract_context(&FILE, &patch, 3), "b\nc\nd\ne");
    }

    #[test]
    fn test_window_clamps_at_start() {
        let patch = ["@@ -1,1 +1,2 @@", "+X"];
        assert_eq!(extract_context(&FILE, &patch, 3), "a\nb\nc\nd");
    }

    #[test]
    fn test_malformed_header_on_first_hunk() {
        let patch = ["@@ garbage @@", "+X"];
        assert_eq!(extract_context(&FILE, &patch, 1), "a\nb");
    }

    #[test]
    fn test_malformed_header_keeps_prior_cursor() {
        let patch = ["@@ -2,2 +2,2 @@", " b", "@@ bad @@", "+X"];
        // seeded to 1, context moves to 2, bad header leaves it there
        assert_eq!(extract_context(&FILE, &patch, 0), "c");
    }

    #[test]
    fn test_overlapping_windows_are_duplicated() {
        let patch = ["@@ -2,1 +2,3 @@", "+X", "+Y"];
        assert_eq!(
            extract_context(&FILE, &patch, 1),
            "a\nb\nc\n\nb\nc\nd"
        );
    }

    #[test]
    fn test_header_resets_cursor() {
        let patch = ["@@ -1,2 +1,2 @@", " a", " b", "@@ -4,1 +4,2 @@", "+X"];
        assert_eq!(extract_context(&FILE, &patch, 0), "d");
    }

    #[test]
    fn test_new_file_hunk() {
        let file = ["x", "y"];
        let patch = ["@@ -0,0 +1,2 @@", "+x", "+y"];
        assert_eq!(extract_context(&file, &patch, 3), "x\ny\n\nx\ny");
    }

    #[test]
    fn test_cursor_past_end_of_file() {
        let patch = ["@@ -40,1 +40,2 @@", "+X"];
        assert_eq!(extract_context(&FILE, &patch, 3), "");
    }

    #[test]
    fn test_result_is_trimmed() {
        let file = ["    indented", "b"];
        let patch = ["@@ -1,1 +1,2 @@", "+X"];
        assert_eq!(extract_context(&file, &patch, 0), "indented");
    }

    #[test]
    fn test_idempotent() {
        let patch = ["@@ -2,3 +2,4 @@", " b", "-c", "+C", "+C2", " d"];
        let first = extract_context(&FILE, &patch, 2);
        let second = extract_context(&FILE, &patch, 2);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_from_text() {
        assert_eq!(
            extract_context_from_text("a\nb\nc\nd\ne", "@@ -2,1 +2,2 @@\n+X", 1),
            "a\nb\nc"
        );
    }

    #[test]
    fn test_cursor_window() {
        let mut cursor = Cursor::default();
        cursor.seed(0);
        assert_eq!(cursor.position(), -1);
        assert_eq!(cursor.window(0, 5), 0..0);
        assert_eq!(cursor.window(2, 5), 0..2);

        cursor.seed(3);
        assert_eq!(cursor.window(1, 5), 1..4);
        cursor.advance();
        assert_eq!(cursor.window(10, 5), 0..5);
        assert_eq!(cursor.window(1, 0), 0..0);
    }

    #[test]
    fn test_cursor_seed_saturates() {
        let mut cursor = Cursor::default();
        cursor.seed(usize::MAX);
        cursor.advance();
        assert_eq!(cursor.window(usize::MAX, 5), 0..5);
    }
}
