//! Extraction strategy trait and the registry that dispatches on format

use crate::config::ExtractorConfig;
use crate::ebook::EpubStrategy;
use crate::error::ExtractionError;
use crate::pdf::PdfStrategy;
use crate::raster::ImageStrategy;
use lectern_domain::{Document, FormatCategory};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Format-specific procedure converting a document into plain text
///
/// Implementations must never panic on bad input: every failure comes back
/// as an [`ExtractionError`].
pub trait ExtractionStrategy: Send + Sync {
    /// Category of documents this strategy reads
    fn category(&self) -> FormatCategory;

    /// Extract plain text from the document at `path`
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Maps each format category to its extraction strategy
pub struct ExtractorRegistry {
    strategies: HashMap<FormatCategory, Box<dyn ExtractionStrategy>>,
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registry with the image, PDF and EPUB strategies
    pub fn with_defaults(config: &ExtractorConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ImageStrategy::new(&config.tesseract_path)));
        registry.register(Box::new(PdfStrategy::new()));
        registry.register(Box::new(EpubStrategy::new(config.wrap_width)));
        registry
    }

    /// Register a strategy under its own category, replacing any previous one
    pub fn register(&mut self, strategy: Box<dyn ExtractionStrategy>) {
        self.strategies.insert(strategy.category(), strategy);
    }

    /// Strategy for a category, if one is registered
    pub fn get(&self, category: FormatCategory) -> Option<&dyn ExtractionStrategy> {
        self.strategies.get(&category).map(|s| s.as_ref())
    }

    /// Extract text from a document using the strategy for its format
    ///
    /// Decoder crates can panic on malformed files; such panics are caught
    /// here and reported as [`ExtractionError::Aborted`].
    pub fn extract(&self, document: &Document) -> Result<String, ExtractionError> {
        let strategy = self
            .get(document.format)
            .ok_or(ExtractionError::Unsupported(document.format))?;

        let path = document.path.as_path();
        panic::catch_unwind(AssertUnwindSafe(|| strategy.extract(path)))
            .unwrap_or(Err(ExtractionError::Aborted(document.format)))
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults(&ExtractorConfig::default())
    }
}
