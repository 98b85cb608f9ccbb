//! Query orchestration for one user's session

use crate::audit::{FileAuditLog, MemoryAuditLog, TeeAuditLog};
use crate::config::PipelineConfig;
use crate::context::{ContextSlot, ContextStore};
use crate::error::ConfigError;
use crate::prompt::PromptBuilder;
use lectern_domain::{
    Answer, AuditSink, Document, EventKind, FormatCategory, LlmProvider, LogEntry, SessionId,
    NO_CONTEXT_MESSAGE, UNSUPPORTED_FORMAT_MESSAGE,
};
use lectern_extractor::ExtractorRegistry;
use lectern_llm::{audit_message, invocation_failure, normalize};
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};

/// Result of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// Text was extracted and is now the context
    Extracted,

    /// Extraction failed; the session has no usable context
    Failed,

    /// The file type is not handled; the context was cleared
    Unsupported,
}

/// What an upload produced, for display
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Uploaded document and its detected format
    pub document: Document,

    /// Extracted text, or the message explaining why there is none
    pub text: String,

    /// How the upload ended
    pub status: UploadStatus,
}

impl UploadOutcome {
    /// Whether the document is now the session's context
    pub fn is_extracted(&self) -> bool {
        self.status == UploadStatus::Extracted
    }
}

/// One user's pipeline: a context slot, a model and an audit trail
///
/// `upload` replaces the context with the text of a document; `ask` answers
/// a question from that context. Both take `&mut self`, so a query can never
/// observe a half-finished upload.
pub struct Session<P: LlmProvider> {
    id: SessionId,
    context: ContextStore,
    provider: P,
    registry: ExtractorRegistry,
    memory: Arc<MemoryAuditLog>,
    audit: TeeAuditLog,
    grounding_header: bool,
}

impl<P> Session<P>
where
    P: LlmProvider,
    P::Error: Display,
{
    /// Create a session with the default extractors and an in-memory log
    pub fn new(provider: P) -> Self {
        let memory = Arc::new(MemoryAuditLog::new());
        let audit = TeeAuditLog::new().with_sink(memory.clone());
        Self {
            id: SessionId::new(),
            context: ContextStore::new(),
            provider,
            registry: ExtractorRegistry::default(),
            memory,
            audit,
            grounding_header: false,
        }
    }

    /// Create a session from configuration
    ///
    /// Opens the audit file if one is configured.
    pub fn from_config(provider: P, config: &PipelineConfig) -> Result<Self, ConfigError> {
        let mut session = Self::new(provider)
            .with_registry(ExtractorRegistry::with_defaults(&config.extraction))
            .with_grounding_header(config.prompt.grounding_header);

        if let Some(path) = &config.audit.file {
            let file = FileAuditLog::open(path).map_err(|source| ConfigError::AuditFile {
                path: path.display().to_string(),
                source,
            })?;
            session = session.with_sink(Arc::new(file));
        }

        Ok(session)
    }

    /// Replace the extraction strategies
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Send audit entries to another sink as well
    pub fn with_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit.push(sink);
        self
    }

    /// Prepend grounding instructions to every prompt
    pub fn with_grounding_header(mut self, enabled: bool) -> Self {
        self.grounding_header = enabled;
        self
    }

    /// Session identifier
    pub fn session_id(&self) -> SessionId {
        self.id
    }

    /// Model in use
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Extract a document and make its text the context
    ///
    /// Never fails: unsupported files and extraction errors come back as
    /// the message the user should see, and are logged.
    pub fn upload(&mut self, path: impl AsRef<Path>) -> UploadOutcome {
        let document = Document::new(path.as_ref());
        let span = info_span!("upload", session = %self.id, format = %document.format);
        let _enter = span.enter();

        if !document.format.is_supported() {
            info!(path = %document.path.display(), "Rejected unsupported document");
            self.context.clear();
            self.record(EventKind::Rejected, UNSUPPORTED_FORMAT_MESSAGE);
            return UploadOutcome {
                document,
                text: UNSUPPORTED_FORMAT_MESSAGE.to_string(),
                status: UploadStatus::Unsupported,
            };
        }

        match self.registry.extract(&document) {
            Ok(text) => {
                info!(chars = text.chars().count(), "Extracted document text");
                self.record(
                    EventKind::Extraction,
                    format!("{}{}", extraction_prefix(document.format), text),
                );
                self.context.set(text.clone());
                UploadOutcome {
                    document,
                    text,
                    status: UploadStatus::Extracted,
                }
            }
            Err(e) => {
                warn!(error = %e, "Extraction failed");
                let label = format_label(document.format);
                let message = format!("Error reading {}: {}", label, e.reason());
                self.context.set_failed(message.clone());
                self.record(EventKind::Error, message.clone());
                UploadOutcome {
                    document,
                    text: message,
                    status: UploadStatus::Failed,
                }
            }
        }
    }

    /// Answer a question from the current context
    ///
    /// With no usable context the model is not called and the fixed
    /// no-context message is returned.
    pub fn ask(&mut self, query: &str) -> Answer {
        let span = info_span!("ask", session = %self.id, model = %self.provider.model_name());
        let _enter = span.enter();

        if self.context.is_empty() {
            debug!(slot = ?self.context.slot(), "No context to answer from");
            self.record(EventKind::Rejected, NO_CONTEXT_MESSAGE);
            return Answer::no_context();
        }

        let prompt = PromptBuilder::new(self.context.get(), query)
            .with_header(self.grounding_header)
            .build();
        self.record(EventKind::Prompt, format!("Prompt fed to model: {}", prompt));

        match self.provider.invoke(&prompt) {
            Ok(response) => {
                let answer = normalize(&response);
                let kind = if answer.kind.is_error() {
                    EventKind::Error
                } else {
                    EventKind::Response
                };
                info!(kind = ?answer.kind, "Model answered");
                self.record(kind, audit_message(&response, &answer));
                answer
            }
            Err(e) => {
                warn!(error = %e, "Model invocation failed");
                let answer = invocation_failure(&e);
                self.record(EventKind::Error, answer.text.clone());
                answer
            }
        }
    }

    /// Text the next question will be answered from
    pub fn extracted_text(&self) -> &str {
        self.context.get()
    }

    /// Current context state
    pub fn context(&self) -> &ContextSlot {
        self.context.slot()
    }

    /// The whole audit trail, oldest entry first, one entry per line
    pub fn logs(&self) -> String {
        self.memory.render()
    }

    /// Audit entries with their event kinds
    pub fn log_entries(&self) -> Vec<LogEntry> {
        self.memory.entries()
    }

    fn record(&self, kind: EventKind, message: impl Into<String>) {
        let entry = LogEntry::new(kind, message);
        debug!(kind = %entry.kind, message = %entry.message, "audit");
        self.audit.record(entry);
    }
}

/// Audit prefix for a successful extraction
fn extraction_prefix(format: FormatCategory) -> &'static str {
    match format {
        FormatCategory::Pdf => "Extracted Text from PDF: ",
        FormatCategory::Epub => "Extracted Text from EPUB: ",
        FormatCategory::Image | FormatCategory::Unsupported => "Extracted Text: ",
    }
}

/// Name of the format in user-facing error text
fn format_label(format: FormatCategory) -> &'static str {
    match format {
        FormatCategory::Image => "image",
        FormatCategory::Pdf => "PDF",
        FormatCategory::Epub => "EPUB",
        FormatCategory::Unsupported => "file",
    }
}
