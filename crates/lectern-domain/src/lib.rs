//! Lectern Domain Layer
//!
//! This crate contains the core vocabulary of Lectern, a question-answering
//! pipeline grounded in a single uploaded document. It has no external
//! dependencies beyond `uuid` and defines the value types and trait interfaces
//! that every other layer depends upon.
//!
//! ## Key Concepts
//!
//! - **Document**: a path plus its inferred [`FormatCategory`]
//! - **ModelResponse**: a model reply tagged by shape
//! - **Answer**: the normalized text handed back for a query
//! - **LogEntry**: one event of the append-only audit trail
//! - **SessionId**: identity of one user's context slot
//!
//! ## Architecture
//!
//! - Pure types and functions only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod answer;
pub mod event;
pub mod format;
pub mod session;
pub mod traits;

// Re-exports for convenience
pub use answer::{
    Answer, AnswerKind, ModelResponse, ANSWER_FIELD, MISSING_FIELD_MESSAGE, NOT_FOUND_PHRASE,
    NO_CONTEXT_MESSAGE, UNEXPECTED_FORMAT_MESSAGE, UNSUPPORTED_FORMAT_MESSAGE,
};
pub use event::{EventKind, LogEntry};
pub use format::{detect_format, Document, FormatCategory};
pub use session::SessionId;
pub use traits::{AuditSink, LlmProvider};
