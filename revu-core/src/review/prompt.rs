//! Prompt construction for file reviews and PR summaries

use super::types::FileDiff;

/// System prompt for reviewing a single file
pub const FILE_REVIEW_SYSTEM_PROMPT: &str = "\
You are an AI Assistant that's an expert at reviewing pull requests. Review the below pull request that you receive.

Input format
- The input format follows Github diff format with addition and subtraction of code.
- The + sign means that code has been added.
- The - sign means that code has been removed.

Instructions
- Take into account that you don't have access to the full code but only the code diff and some surrounding lines.
- Only answer on what can be improved and provide the improvement in code.
- Answer in short form.
- Include code snippets if necessary.
- Adhere to the languages code conventions.
- Make it personal and always show gratitude to the author using \"@\" when tagging.";

/// System prompt for the pull request summary
pub const SUMMARY_SYSTEM_PROMPT: &str = "\
You are a helpful code reviewer. Provide a concise summary of the overall changes in this pull request. Your output should be structured as bullet points";

/// Shown in place of an empty context excerpt
const NO_CONTEXT: &str = "(no additional context)";

/// Inputs for a single file review
#[derive(Debug, Clone)]
pub struct FileReviewPrompt<'a> {
    pub filename: &'a str,
    pub patch: &'a str,
    pub context: &'a str,
    /// PR author login, used for the `@` mention
    pub author: Option<&'a str>,
}

impl FileReviewPrompt<'_> {
    /// Generate the user message for the model
    pub fn to_user_message(&self) -> String {
        let mut prompt = String::new();

        if let Some(author) = self.author.filter(|a| !a.is_empty()) {
            prompt.push_str(&format!("Pull request author: @{}\n\n", author));
        }

        prompt.push_str(&format!(
            "Review the following code changes for file {}:\n\n",
            self.filename
        ));
        prompt.push_str("Changed parts:\n");
        prompt.push_str(self.patch);
        prompt.push_str("\n\nBroader file context:\n");
        if self.context.is_empty() {
            prompt.push_str(NO_CONTEXT);
        } else {
            prompt.push_str(self.context);
        }

        prompt
    }
}

/// Generate the user message asking for a summary of all changes
pub fn summary_user_message(files: &[FileDiff]) -> String {
    let all_changes = files
        .iter()
        .map(|file| format!("File: {}\n\n{}\n\n", file.filename, file.patch))
        .collect::<Vec<_>>()
        .join("---\n\n");

    format!(
        "Summarize the following changes in the pull request:\n\n{}",
        all_changes
    )
}

/// Append a generated summary to an existing PR description
pub fn description_with_summary(current_body: &str, summary: &str) -> String {
    format!("{}\n\n## AI Summary\n\n{}", current_body, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::FileStatus;

    #[test]
    fn test_file_review_message() {
        let prompt = FileReviewPrompt {
            filename: "src/main.rs",
            patch: "@@ -1,1 +1,2 @@\n+use std::io;",
            context: "fn main() {}",
            author: Some("octocat"),
        };

        let message = prompt.to_user_message();
        assert!(message.starts_with("Pull request author: @octocat\n\n"));
        assert!(message.contains("Review the following code changes for file src/main.rs:"));
        assert!(message.contains("Changed parts:\n@@ -1,1 +1,2 @@\n+use std::io;"));
        assert!(message.ends_with("Broader file context:\nfn main() {}"));
    }

    #[test]
    fn test_empty_context_placeholder() {
        let prompt = FileReviewPrompt {
            filename: "a.txt",
            patch: "-gone",
            context: "",
            author: None,
        };

        let message = prompt.to_user_message();
        assert!(message.starts_with("Review the following"));
        assert!(message.ends_with(NO_CONTEXT));
    }

    #[test]
    fn test_summary_message_joins_files() {
        let files = vec![
            FileDiff::new("a.rs", FileStatus::Modified, "+a"),
            FileDiff::new("b.rs", FileStatus::Added, "+b"),
        ];

        assert_eq!(
            summary_user_message(&files),
            "Summarize the following changes in the pull request:\n\n\
             File: a.rs\n\n+a\n\n---\n\nFile: b.rs\n\n+b\n\n"
        );
    }

    #[test]
    fn test_description_with_summary() {
        assert_eq!(
            description_with_summary("Fixes #1", "- did things"),
            "Fixes #1\n\n## AI Summary\n\n- did things"
        );
    }
}
