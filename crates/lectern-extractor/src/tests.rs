//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::fixtures::{write_epub, write_pdf, EpubItem};
    use crate::{
        EpubStrategy, ExtractionError, ExtractionStrategy, ExtractorConfig, ExtractorRegistry,
        PdfStrategy,
    };
    use lectern_domain::{Document, FormatCategory};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pdf_pages_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("boiling.pdf");
        write_pdf(&path, &["Water boils at 96C", "at altitude X"]);

        let text = PdfStrategy::new().extract(&path).unwrap();
        assert_eq!(text, "Water boils at 96C\nat altitude X");
    }

    #[test]
    fn test_pdf_blank_page_keeps_its_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gap.pdf");
        write_pdf(&path, &["first", "", "third"]);

        let pages = PdfStrategy::new().page_texts(&path).unwrap();
        assert_eq!(pages, vec!["first", "", "third"]);
    }

    #[test]
    fn test_pdf_extraction_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repeat.pdf");
        write_pdf(&path, &["alpha", "beta"]);

        let strategy = PdfStrategy::new();
        let first = strategy.extract(&path).unwrap();
        let second = strategy.extract(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pdf_garbage_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"this is not a pdf").unwrap();

        let registry = ExtractorRegistry::default();
        let result = registry.extract(&Document::new(&path));
        assert!(matches!(
            result,
            Err(ExtractionError::Pdf(_)) | Err(ExtractionError::Aborted(FormatCategory::Pdf))
        ));
    }

    #[test]
    fn test_epub_spine_order_wins_over_manifest_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.epub");
        write_epub(
            &path,
            &[
                EpubItem::chapter("ch2", "ch2.xhtml", "Second chapter"),
                EpubItem::chapter("ch1", "ch1.xhtml", "First chapter"),
            ],
            &["ch1", "ch2"],
        );

        let segments = EpubStrategy::default().item_texts(&path).unwrap();
        assert_eq!(segments, vec!["First chapter", "Second chapter"]);
    }

    #[test]
    fn test_epub_skips_non_document_items() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("styled.epub");
        write_epub(
            &path,
            &[
                EpubItem {
                    id: "style",
                    href: "style.css",
                    media_type: "text/css",
                    body: "p { color: red; }",
                },
                EpubItem {
                    id: "cover",
                    href: "cover.svg",
                    media_type: "image/svg+xml",
                    body: "<svg xmlns=\"http://www.w3.org/2000/svg\"><text>Cover</text></svg>",
                },
                EpubItem::chapter("ch1", "ch1.xhtml", "Only prose counts"),
            ],
            &["cover", "ch1"],
        );

        let text = EpubStrategy::default().extract(&path).unwrap();
        assert_eq!(text, "Only prose counts");
    }

    #[test]
    fn test_epub_renders_markup_as_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("markup.epub");
        write_epub(
            &path,
            &[EpubItem::chapter(
                "ch1",
                "ch1.xhtml",
                "Water boils at <b>96C</b> at altitude X.",
            )],
            &["ch1"],
        );

        let text = EpubStrategy::default().extract(&path).unwrap();
        assert_eq!(text, "Water boils at 96C at altitude X.");
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_epub_garbage_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.epub");
        fs::write(&path, b"PK but not really").unwrap();

        let registry = ExtractorRegistry::default();
        let result = registry.extract(&Document::new(&path));
        assert!(matches!(
            result,
            Err(ExtractionError::Epub(_)) | Err(ExtractionError::Aborted(FormatCategory::Epub))
        ));
    }

    #[test]
    fn test_registry_dispatches_on_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("REPORT.PDF");
        write_pdf(&path, &["upper case extension"]);

        let registry = ExtractorRegistry::with_defaults(&ExtractorConfig::default());
        let text = registry.extract(&Document::new(&path)).unwrap();
        assert_eq!(text, "upper case extension");
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let dir = TempDir::new().unwrap();
        let registry = ExtractorRegistry::default();
        let result = registry.extract(&Document::new(dir.path().join("absent.png")));
        assert!(result.is_err());
    }
}
