//! Image strategy: optical character recognition over a whole raster image

use crate::error::ExtractionError;
use crate::ocr::TesseractEngine;
use crate::strategy::ExtractionStrategy;
use lectern_domain::FormatCategory;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads text from PNG/JPEG images with Tesseract
///
/// The image is decoded first so unreadable files fail fast with a decode
/// error, then re-encoded as PNG for the OCR engine.
pub struct ImageStrategy {
    engine: TesseractEngine,
}

impl ImageStrategy {
    /// Create a strategy using the given Tesseract executable
    pub fn new(tesseract_path: impl Into<PathBuf>) -> Self {
        Self {
            engine: TesseractEngine::new(tesseract_path),
        }
    }

    /// Create a strategy around an existing engine handle
    pub fn with_engine(engine: TesseractEngine) -> Self {
        Self { engine }
    }
}

impl ExtractionStrategy for ImageStrategy {
    fn category(&self) -> FormatCategory {
        FormatCategory::Image
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let decoded = image::open(path)?;
        debug!(
            path = %path.display(),
            width = decoded.width(),
            height = decoded.height(),
            "Decoded image"
        );

        let scratch = tempfile::Builder::new()
            .prefix("lectern-ocr-")
            .suffix(".png")
            .tempfile()?;
        decoded.save_with_format(scratch.path(), image::ImageFormat::Png)?;

        let text = self.engine.recognize(scratch.path())?;
        Ok(text.trim().to_string())
    }
}
