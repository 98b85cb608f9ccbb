//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the question-answering pipeline
//! and infrastructure. Implementations live in other crates.

use crate::{LogEntry, ModelResponse};

/// Trait for language model provider operations
///
/// Implemented by the infrastructure layer (lectern-llm). The provider is the
/// only component allowed to perform network I/O, and it must be replaceable
/// by a test double.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Send a prompt and classify the reply by shape
    fn invoke(&self, prompt: &str) -> Result<ModelResponse, Self::Error>;

    /// Model identifier used for generation
    fn model_name(&self) -> &str;
}

impl<T: LlmProvider + ?Sized> LlmProvider for Box<T> {
    type Error = T::Error;

    fn invoke(&self, prompt: &str) -> Result<ModelResponse, Self::Error> {
        (**self).invoke(prompt)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Destination for audit trail entries
///
/// Implemented by the application layer (lectern-pipeline). Recording never
/// fails from the caller's point of view; sinks deal with their own I/O errors.
pub trait AuditSink: Send + Sync {
    /// Append one entry, preserving call order
    fn record(&self, entry: LogEntry);
}
