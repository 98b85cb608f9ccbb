//! Error types for the Extractor

use lectern_domain::FormatCategory;
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Document could not be read from disk
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster image could not be decoded
    #[error("image decode failed: {0}")]
    ImageDecode(String),

    /// OCR executable could not be started
    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    /// OCR engine ran but reported failure
    #[error("OCR failed: {0}")]
    Ocr(String),

    /// PDF parse or text extraction error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// EPUB container or content error
    #[error("EPUB error: {0}")]
    Epub(String),

    /// Decoder panicked on malformed input
    #[error("{0} extraction aborted on malformed input")]
    Aborted(FormatCategory),

    /// No strategy registered for the category
    #[error("no extraction strategy for {0} documents")]
    Unsupported(FormatCategory),
}

impl ExtractionError {
    /// The underlying cause without the variant's own prefix
    pub fn reason(&self) -> String {
        match self {
            ExtractionError::ImageDecode(msg)
            | ExtractionError::Ocr(msg)
            | ExtractionError::Pdf(msg)
            | ExtractionError::Epub(msg) => msg.clone(),
            ExtractionError::Io(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<lopdf::Error> for ExtractionError {
    fn from(e: lopdf::Error) -> Self {
        ExtractionError::Pdf(e.to_string())
    }
}

impl From<image::ImageError> for ExtractionError {
    fn from(e: image::ImageError) -> Self {
        ExtractionError::ImageDecode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_drops_variant_prefix() {
        let err = ExtractionError::Pdf("invalid file trailer".to_string());
        assert_eq!(err.to_string(), "PDF error: invalid file trailer");
        assert_eq!(err.reason(), "invalid file trailer");
        assert_eq!(ExtractionError::Ocr("exit 1".to_string()).reason(), "exit 1");
    }

    #[test]
    fn test_reason_keeps_self_describing_variants() {
        let err = ExtractionError::Aborted(FormatCategory::Epub);
        assert_eq!(err.reason(), "epub extraction aborted on malformed input");
    }
}
