//! Startup checks for external collaborators
//!
//! Lectern refuses to start unless the OCR engine runs and the inference
//! service answers. These are the only fatal conditions.

use crate::config::PipelineConfig;
use crate::error::ConfigError;
use lectern_extractor::{ExtractorConfig, TesseractEngine};
use lectern_llm::OllamaProvider;
use tracing::info;

/// What the startup checks found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    /// First line of the OCR engine's version banner
    pub ocr_version: String,

    /// Inference endpoint that answered
    pub endpoint: String,

    /// Model that will be used
    pub model: String,
}

/// Check that the configured OCR executable starts
pub fn check_ocr(config: &ExtractorConfig) -> Result<String, ConfigError> {
    TesseractEngine::new(&config.tesseract_path)
        .check_available()
        .map_err(|e| ConfigError::OcrUnavailable(e.to_string()))
}

/// Check that the inference service answers
pub fn check_inference(provider: &OllamaProvider) -> Result<(), ConfigError> {
    provider
        .health_check()
        .map_err(|e| ConfigError::InferenceUnavailable(e.to_string()))
}

/// Run every startup check, OCR engine first
pub fn run(
    config: &PipelineConfig,
    provider: &OllamaProvider,
) -> Result<PreflightReport, ConfigError> {
    let ocr_version = check_ocr(&config.extraction)?;
    info!(
        tesseract = %config.extraction.tesseract_path.display(),
        version = %ocr_version,
        "OCR engine available"
    );

    check_inference(provider)?;
    info!(endpoint = %provider.endpoint(), "Inference service reachable");

    Ok(PreflightReport {
        ocr_version,
        endpoint: provider.endpoint().to_string(),
        model: config.llm.model.clone(),
    })
}
