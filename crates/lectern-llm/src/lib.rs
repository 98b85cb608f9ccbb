//! Lectern LLM Provider Layer
//!
//! Pluggable LLM provider implementations and reply normalization.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `lectern-domain`. It is the only part of Lectern that talks to the network.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use lectern_llm::{normalize, MockProvider};
//! use lectern_domain::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let reply = provider.invoke("test prompt").unwrap();
//! assert_eq!(normalize(&reply).text(), "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod normalize;
pub mod ollama;

use lectern_domain::{LlmProvider, ModelResponse};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use normalize::{audit_message, invocation_failure, normalize};
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Canned outcome for a mocked prompt
#[derive(Debug, Clone)]
enum MockReply {
    Respond(ModelResponse),
    Fail,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls. Every prompt it receives is captured so tests can assert on exactly
/// what the pipeline sent.
///
/// # Examples
///
/// ```
/// use lectern_llm::MockProvider;
/// use lectern_domain::{LlmProvider, ModelResponse};
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(
///     provider.invoke("any prompt").unwrap(),
///     ModelResponse::Text("Fixed response".to_string())
/// );
///
/// // Per-prompt responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", ModelResponse::mapping([("output", "response1")]));
/// assert!(matches!(provider.invoke("prompt1").unwrap(), ModelResponse::Mapping(_)));
/// assert_eq!(provider.prompts(), vec!["prompt1".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: ModelResponse,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    model_name: String,
}

impl MockProvider {
    /// Create a new MockProvider answering every prompt with plain text
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_response(ModelResponse::Text(response.into()))
    }

    /// Create a new MockProvider answering every prompt with the given reply
    pub fn with_response(response: ModelResponse) -> Self {
        Self {
            default_response: response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            model_name: "mock".to_string(),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: ModelResponse) {
        lock(&self.responses).insert(prompt.into(), MockReply::Respond(response));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MockReply::Fail);
    }

    /// Get the number of times invoke was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Every prompt received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// The most recent prompt, if any
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.prompts).last().cloned()
    }

    /// Forget captured prompts
    pub fn reset(&self) {
        lock(&self.prompts).clear();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn invoke(&self, prompt: &str) -> Result<ModelResponse, Self::Error> {
        lock(&self.prompts).push(prompt.to_string());

        // Check if we have a specific response for this prompt
        let responses = lock(&self.responses);
        match responses.get(prompt) {
            Some(MockReply::Respond(response)) => Ok(response.clone()),
            Some(MockReply::Fail) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
