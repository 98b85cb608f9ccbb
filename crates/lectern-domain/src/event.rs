//! Event module - entries of the audit trail

use std::fmt;

/// Pipeline stage an audit entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Text extracted from an uploaded document
    Extraction,

    /// Rendered prompt sent to the model
    Prompt,

    /// Normalized model response
    Response,

    /// A failure that was recovered and turned into text
    Error,

    /// Input the pipeline declined (unsupported format, empty context)
    Rejected,
}

impl EventKind {
    /// Get the event kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Extraction => "extraction",
            EventKind::Prompt => "prompt",
            EventKind::Response => "response",
            EventKind::Error => "error",
            EventKind::Rejected => "rejected",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of the append-only audit trail
///
/// Displays as its message so a rendered log reads like the event text itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Stage that produced the entry
    pub kind: EventKind,

    /// Human-readable event text
    pub message: String,
}

impl LogEntry {
    /// Create a new entry
    pub fn new(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
