//! EPUB strategy: spine-ordered document items rendered as plain text

use crate::error::ExtractionError;
use crate::strategy::ExtractionStrategy;
use epub::doc::EpubDoc;
use html2text::render::text_renderer::TrivialDecorator;
use lectern_domain::FormatCategory;
use std::path::Path;
use tracing::debug;

/// Extracts text from the document items of an EPUB container
///
/// Items are visited in the container's declared reading order (the spine).
/// Only XHTML/HTML items contribute; stylesheets, images and other resources
/// are skipped. Each item's markup is rendered to plain text, trimmed, and
/// the items are joined with `\n`.
#[derive(Debug)]
pub struct EpubStrategy {
    wrap_width: usize,
}

impl EpubStrategy {
    /// Create a strategy rendering text at the given line width
    pub fn new(wrap_width: usize) -> Self {
        Self { wrap_width }
    }

    /// Extract the trimmed text of each document item, in reading order
    pub fn item_texts(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let mut doc = EpubDoc::new(path)
            .map_err(|e| ExtractionError::Epub(format!("Failed to open EPUB: {}", e)))?;

        let mut segments = Vec::new();
        if doc.spine.is_empty() {
            return Ok(segments);
        }

        let mut position = 0usize;

        loop {
            let (bytes, mime) = doc.get_current().ok_or_else(|| {
                ExtractionError::Epub(format!("spine item {} cannot be read", position))
            })?;

            if is_document_item(&mime) {
                let markup = String::from_utf8(bytes).map_err(|e| {
                    ExtractionError::Epub(format!("spine item {} is not UTF-8: {}", position, e))
                })?;
                segments.push(self.render(&markup));
            } else {
                debug!(position, %mime, "Skipping non-document EPUB item");
            }

            if !doc.go_next() {
                break;
            }
            position += 1;
        }

        Ok(segments)
    }

    fn render(&self, markup: &str) -> String {
        html2text::from_read_with_decorator(
            markup.as_bytes(),
            self.wrap_width,
            TrivialDecorator::new(),
        )
        .trim()
        .to_string()
    }
}

impl Default for EpubStrategy {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_WRAP_WIDTH)
    }
}

impl ExtractionStrategy for EpubStrategy {
    fn category(&self) -> FormatCategory {
        FormatCategory::Epub
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        Ok(self.item_texts(path)?.join("\n"))
    }
}

/// Whether a media type names an (X)HTML content document
fn is_document_item(mime: &str) -> bool {
    let mime = mime.to_ascii_lowercase();
    mime == "application/xhtml+xml" || mime == "text/html"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_item_media_types() {
        assert!(is_document_item("application/xhtml+xml"));
        assert!(is_document_item("text/html"));
        assert!(is_document_item("Application/XHTML+XML"));
        assert!(!is_document_item("text/css"));
        assert!(!is_document_item("image/svg+xml"));
        assert!(!is_document_item("image/png"));
    }

    #[test]
    fn test_render_strips_markup() {
        let strategy = EpubStrategy::default();
        let text = strategy.render(
            "<html><body><p>Water boils at <b>96C</b>.</p></body></html>",
        );
        assert_eq!(text, "Water boils at 96C.");
    }
}
