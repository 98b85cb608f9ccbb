//! Lectern Pipeline
//!
//! Turns one uploaded document and a stream of questions into grounded
//! answers, keeping an audit trail of every step.
//!
//! # Architecture
//!
//! ```text
//! upload: path → detect_format → ExtractorRegistry → ContextStore
//! ask:    query → ContextStore → PromptBuilder → LlmProvider → normalize → Answer
//!                   every step → AuditSink
//! ```
//!
//! A [`Session`] owns exactly one context. Uploading a new document replaces
//! it; a failed or unsupported upload leaves the session without context, and
//! questions are then refused without calling the model.
//!
//! # Example Usage
//!
//! ```no_run
//! use lectern_llm::MockProvider;
//! use lectern_pipeline::Session;
//!
//! let mut session = Session::new(MockProvider::new("96C at altitude X."));
//! session.upload("boiling.pdf");
//! let answer = session.ask("At what temperature does water boil?");
//! println!("{}", answer);
//! println!("{}", session.logs());
//! ```

#![warn(missing_docs)]

pub mod audit;
pub mod config;
pub mod context;
pub mod error;
pub mod preflight;
pub mod prompt;
pub mod session;

pub use audit::{FileAuditLog, MemoryAuditLog, TeeAuditLog};
pub use config::{AuditSettings, LlmSettings, PipelineConfig, PromptSettings};
pub use context::{ContextSlot, ContextStore};
pub use error::ConfigError;
pub use preflight::PreflightReport;
pub use prompt::{PromptBuilder, GROUNDING_INSTRUCTIONS};
pub use session::{Session, UploadOutcome, UploadStatus};
