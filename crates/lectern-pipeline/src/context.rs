//! Single-slot context store

/// State of the one context a session holds
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContextSlot {
    /// Nothing extracted yet, or cleared by an unsupported upload
    #[default]
    Empty,

    /// Text of the most recent successful extraction
    Loaded(String),

    /// The most recent extraction failed with this message
    Failed(String),
}

/// Holds the text of the most recently uploaded document
///
/// Every write replaces the previous value; nothing is merged or kept.
#[derive(Debug, Default)]
pub struct ContextStore {
    slot: ContextSlot,
}

impl ContextStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the context with freshly extracted text
    pub fn set(&mut self, text: impl Into<String>) {
        self.slot = ContextSlot::Loaded(text.into());
    }

    /// Replace the context with a failed extraction
    pub fn set_failed(&mut self, message: impl Into<String>) {
        self.slot = ContextSlot::Failed(message.into());
    }

    /// Forget the current context
    pub fn clear(&mut self) {
        self.slot = ContextSlot::Empty;
    }

    /// Current context text; empty unless the last extraction succeeded
    pub fn get(&self) -> &str {
        match &self.slot {
            ContextSlot::Loaded(text) => text,
            ContextSlot::Empty | ContextSlot::Failed(_) => "",
        }
    }

    /// Whether there is no text to ground an answer on
    pub fn is_empty(&self) -> bool {
        self.get().is_empty()
    }

    /// Current slot state
    pub fn slot(&self) -> &ContextSlot {
        &self.slot
    }
}
