//! Reply normalization
//!
//! Turns a [`ModelResponse`] into the [`Answer`] returned to the caller.
//! Every shape is handled explicitly, in priority order:
//!
//! 1. mapping with the answer field → that field's value
//! 2. mapping without it → [`MISSING_FIELD_MESSAGE`]
//! 3. plain text → unchanged
//! 4. anything else → [`UNEXPECTED_FORMAT_MESSAGE`]
//!
//! Invocation failures are folded in by [`invocation_failure`].

use lectern_domain::{
    Answer, AnswerKind, ModelResponse, ANSWER_FIELD, MISSING_FIELD_MESSAGE,
    UNEXPECTED_FORMAT_MESSAGE,
};
use std::fmt::Display;

/// Normalize a raw reply into answer text
pub fn normalize(response: &ModelResponse) -> Answer {
    match response {
        ModelResponse::Mapping(fields) => match fields.get(ANSWER_FIELD) {
            Some(value) => Answer::grounded(value.clone()),
            None => Answer::failure(AnswerKind::MissingField, MISSING_FIELD_MESSAGE),
        },
        ModelResponse::Text(text) => Answer::grounded(text.clone()),
        ModelResponse::Unrecognized(_) => {
            Answer::failure(AnswerKind::UnexpectedFormat, UNEXPECTED_FORMAT_MESSAGE)
        }
    }
}

/// Answer reporting a failed provider call
pub fn invocation_failure(error: &impl Display) -> Answer {
    Answer::failure(
        AnswerKind::InvocationFailed,
        format!("Error generating response: {}", error),
    )
}

/// Audit text for a normalized reply
///
/// Failures are logged as their own message; successful replies note whether
/// they arrived as plain text or as a mapping.
pub fn audit_message(response: &ModelResponse, answer: &Answer) -> String {
    if answer.kind.is_error() {
        return answer.text.clone();
    }
    match response {
        ModelResponse::Text(_) => format!("Model response (string): {}", answer.text),
        ModelResponse::Mapping(_) | ModelResponse::Unrecognized(_) => {
            format!("Model response: {}", answer.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LlmError;

    #[test]
    fn test_mapping_with_field() {
        let answer = normalize(&ModelResponse::mapping([("output", "X")]));
        assert_eq!(answer.text(), "X");
        assert_eq!(answer.kind, AnswerKind::Grounded);
    }

    #[test]
    fn test_mapping_without_field() {
        let answer = normalize(&ModelResponse::mapping([("result", "X")]));
        assert_eq!(answer.text(), MISSING_FIELD_MESSAGE);
        assert_eq!(answer.kind, AnswerKind::MissingField);
    }

    #[test]
    fn test_empty_mapping() {
        let answer = normalize(&ModelResponse::Mapping(Default::default()));
        assert_eq!(answer.kind, AnswerKind::MissingField);
    }

    #[test]
    fn test_plain_text_unchanged() {
        let answer = normalize(&ModelResponse::Text("  Y \n".to_string()));
        assert_eq!(answer.text(), "  Y \n");
        assert_eq!(answer.kind, AnswerKind::Grounded);
    }

    #[test]
    fn test_unrecognized_shape() {
        let answer = normalize(&ModelResponse::Unrecognized("array".to_string()));
        assert_eq!(answer.text(), UNEXPECTED_FORMAT_MESSAGE);
        assert_eq!(answer.kind, AnswerKind::UnexpectedFormat);
    }

    #[test]
    fn test_invocation_failure() {
        let answer = invocation_failure(&LlmError::Communication("refused".to_string()));
        assert_eq!(
            answer.text(),
            "Error generating response: Communication error: refused"
        );
        assert_eq!(answer.kind, AnswerKind::InvocationFailed);
    }

    #[test]
    fn test_audit_messages() {
        let text = ModelResponse::Text("Y".to_string());
        assert_eq!(audit_message(&text, &normalize(&text)), "Model response (string): Y");

        let mapping = ModelResponse::mapping([("output", "X")]);
        assert_eq!(audit_message(&mapping, &normalize(&mapping)), "Model response: X");

        let missing = ModelResponse::mapping([("other", "X")]);
        assert_eq!(audit_message(&missing, &normalize(&missing)), MISSING_FIELD_MESSAGE);
    }
}
