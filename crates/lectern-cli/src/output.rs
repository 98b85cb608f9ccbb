//! Output formatting for the CLI.

use colored::*;
use lectern_domain::Answer;
use lectern_pipeline::{UploadOutcome, UploadStatus};

/// Shown when the model produced an empty answer.
pub const EMPTY_ANSWER_MESSAGE: &str = "Error processing query. Check the logs.";

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format a titled block of text.
    pub fn section(&self, title: &str, body: &str) -> String {
        format!("{}\n{}", self.colorize(&format!("── {} ──", title), "cyan"), body)
    }

    /// Format the result of an upload.
    pub fn upload(&self, outcome: &UploadOutcome) -> String {
        match outcome.status {
            UploadStatus::Extracted => {
                let body = if outcome.text.is_empty() {
                    self.colorize("(no text found)", "yellow")
                } else {
                    outcome.text.clone()
                };
                let title = format!(
                    "Extracted Text ({}, {})",
                    outcome.document.file_name(),
                    outcome.document.format
                );
                self.section(&title, &body)
            }
            UploadStatus::Failed => self.error(&outcome.text),
            UploadStatus::Unsupported => self.warning(&outcome.text),
        }
    }

    /// Format an answer; refusals and failures are highlighted.
    pub fn answer(&self, answer: &Answer) -> String {
        if answer.text.is_empty() {
            return self.error(EMPTY_ANSWER_MESSAGE);
        }
        if answer.kind.is_error() {
            self.warning(&answer.text)
        } else {
            answer.text.clone()
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_domain::{AnswerKind, Document, NO_CONTEXT_MESSAGE, UNSUPPORTED_FORMAT_MESSAGE};

    fn plain() -> Formatter {
        Formatter::new(false)
    }

    #[test]
    fn test_colorize_disabled() {
        assert_eq!(plain().success("test"), "✓ test");
        assert_eq!(plain().error("bad"), "✗ bad");
    }

    #[test]
    fn test_grounded_answer_is_verbatim() {
        let answer = Answer::grounded("96C at altitude X.");
        assert_eq!(plain().answer(&answer), "96C at altitude X.");
    }

    #[test]
    fn test_refusal_is_flagged() {
        let answer = Answer::no_context();
        assert_eq!(answer.kind, AnswerKind::NoContext);
        assert_eq!(plain().answer(&answer), format!("⚠ {}", NO_CONTEXT_MESSAGE));
    }

    #[test]
    fn test_empty_answer() {
        let answer = Answer::grounded("");
        assert_eq!(plain().answer(&answer), format!("✗ {}", EMPTY_ANSWER_MESSAGE));
    }

    #[test]
    fn test_upload_sections() {
        let extracted = UploadOutcome {
            document: Document::new("notes.pdf"),
            text: "Page one".to_string(),
            status: UploadStatus::Extracted,
        };
        assert_eq!(
            plain().upload(&extracted),
            "── Extracted Text (notes.pdf, pdf) ──\nPage one"
        );

        let rejected = UploadOutcome {
            document: Document::new("notes.txt"),
            text: UNSUPPORTED_FORMAT_MESSAGE.to_string(),
            status: UploadStatus::Unsupported,
        };
        assert_eq!(
            plain().upload(&rejected),
            format!("⚠ {}", UNSUPPORTED_FORMAT_MESSAGE)
        );
    }
}
