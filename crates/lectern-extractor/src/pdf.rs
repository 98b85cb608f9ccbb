//! PDF strategy: page-ordered text extraction with lopdf

use crate::error::ExtractionError;
use crate::strategy::ExtractionStrategy;
use lectern_domain::FormatCategory;
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// Extracts the text of every page, in page order, one segment per page
///
/// Segments are trimmed and joined with `\n`. A page without text keeps its
/// place as an empty segment.
#[derive(Debug, Default)]
pub struct PdfStrategy;

impl PdfStrategy {
    /// Create a new PdfStrategy
    pub fn new() -> Self {
        Self
    }

    /// Extract the trimmed text of each page, in page-number order
    pub fn page_texts(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let doc = Document::load(path)?;

        if doc.is_encrypted() {
            return Err(ExtractionError::Pdf("document is encrypted".to_string()));
        }

        let pages = doc.get_pages();
        debug!(path = %path.display(), pages = pages.len(), "Loaded PDF");

        pages
            .keys()
            .map(|&number| {
                doc.extract_text(&[number])
                    .map(|text| text.trim().to_string())
                    .map_err(|e| ExtractionError::Pdf(format!("page {}: {}", number, e)))
            })
            .collect()
    }
}

impl ExtractionStrategy for PdfStrategy {
    fn category(&self) -> FormatCategory {
        FormatCategory::Pdf
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        Ok(self.page_texts(path)?.join("\n"))
    }
}
