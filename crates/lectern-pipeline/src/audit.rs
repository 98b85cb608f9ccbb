//! Audit trail sinks
//!
//! [`MemoryAuditLog`] keeps every entry for the log accessor,
//! [`FileAuditLog`] appends entries to disk, and [`TeeAuditLog`] fans one
//! entry out to several sinks.

use lectern_domain::{AuditSink, LogEntry};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Unbounded in-memory audit log
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryAuditLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all entries in insertion order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of entries recorded
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All messages joined with `\n`, oldest first
    pub fn render(&self) -> String {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|entry| entry.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl AuditSink for MemoryAuditLog {
    fn record(&self, entry: LogEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

/// Appends one line per entry to a file
///
/// Lines look like `[prompt] Prompt fed to model: ...`. Newlines inside a
/// message are written as `\n` so each entry stays on one line.
#[derive(Debug)]
pub struct FileAuditLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileAuditLog {
    /// Open `path` for appending, creating it if missing
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// File being appended to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditLog {
    fn record(&self, entry: LogEntry) {
        let line = format!(
            "[{}] {}\n",
            entry.kind,
            entry.message.replace('\\', "\\\\").replace('\n', "\\n")
        );
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = file.write_all(line.as_bytes()).and_then(|_| file.flush()) {
            warn!(path = %self.path.display(), error = %e, "Failed to append audit entry");
        }
    }
}

/// Forwards every entry to each inner sink, in order
#[derive(Default)]
pub struct TeeAuditLog {
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl TeeAuditLog {
    /// Create a tee with no sinks
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink to the end of the fan-out list
    pub fn with_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Add a sink in place
    pub fn push(&mut self, sink: Arc<dyn AuditSink>) {
        self.sinks.push(sink);
    }

    /// Number of inner sinks
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether the tee forwards nowhere
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl AuditSink for TeeAuditLog {
    fn record(&self, entry: LogEntry) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.record(entry.clone());
            }
            last.record(entry);
        }
    }
}
