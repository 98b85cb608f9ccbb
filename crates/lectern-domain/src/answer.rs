//! Answer module - raw model replies and the normalized answers built from them

use std::collections::BTreeMap;
use std::fmt;

/// Field of a structured model reply that carries the answer text
pub const ANSWER_FIELD: &str = "output";

/// Returned when a query arrives before any document text is available
pub const NO_CONTEXT_MESSAGE: &str =
    "No information has been extracted yet. Please upload an image, PDF, or EPUB file first.";

/// Returned when an uploaded document has an unrecognized extension
pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Unsupported file format. Please upload an image, PDF, or EPUB file.";

/// Returned when a structured reply lacks [`ANSWER_FIELD`]
pub const MISSING_FIELD_MESSAGE: &str = "Response dictionary does not contain 'output'.";

/// Returned when a reply is neither text nor a structured mapping
pub const UNEXPECTED_FORMAT_MESSAGE: &str =
    "Unexpected response format from model. Response is not a dictionary or string.";

/// Phrase the model is told to emit when the context lacks the answer
pub const NOT_FOUND_PHRASE: &str = "Information not found in the provided documents.";

/// Raw reply from a language model provider, tagged by shape
///
/// Providers classify whatever the service sent back; normalization then
/// handles every shape exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelResponse {
    /// Plain generated text
    Text(String),

    /// Structured key/value reply (non-string values rendered as text)
    Mapping(BTreeMap<String, String>),

    /// Any other shape; carries a short description for diagnostics
    Unrecognized(String),
}

impl ModelResponse {
    /// Convenience constructor for a mapping reply
    pub fn mapping<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        ModelResponse::Mapping(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// How an [`Answer`] came about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerKind {
    /// Text produced by the model from the document context
    Grounded,

    /// Fixed refusal because no document text was available
    NoContext,

    /// The provider call failed
    InvocationFailed,

    /// Structured reply without the answer field
    MissingField,

    /// Reply of an unrecognized shape
    UnexpectedFormat,
}

impl AnswerKind {
    /// Whether this answer reports a failure rather than model output
    pub fn is_error(&self) -> bool {
        !matches!(self, AnswerKind::Grounded)
    }
}

/// Final text returned to the caller for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Answer text shown to the user
    pub text: String,

    /// Provenance of the text
    pub kind: AnswerKind,
}

impl Answer {
    /// Model-produced answer
    pub fn grounded(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AnswerKind::Grounded,
        }
    }

    /// Fixed refusal for an empty context
    pub fn no_context() -> Self {
        Self {
            text: NO_CONTEXT_MESSAGE.to_string(),
            kind: AnswerKind::NoContext,
        }
    }

    /// Failure answer with explanatory text
    pub fn failure(kind: AnswerKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Answer text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_display_is_text() {
        let answer = Answer::grounded("96C");
        assert_eq!(answer.to_string(), "96C");
        assert!(!answer.kind.is_error());
    }

    #[test]
    fn test_no_context_answer() {
        let answer = Answer::no_context();
        assert_eq!(answer.text(), NO_CONTEXT_MESSAGE);
        assert_eq!(answer.kind, AnswerKind::NoContext);
        assert!(answer.kind.is_error());
    }

    #[test]
    fn test_mapping_constructor() {
        let response = ModelResponse::mapping([("output", "x"), ("model", "mistral")]);
        match response {
            ModelResponse::Mapping(map) => {
                assert_eq!(map.get("output").map(String::as_str), Some("x"));
                assert_eq!(map.len(), 2);
            }
            other => panic!("expected mapping, got {:?}", other),
        }
    }
}
