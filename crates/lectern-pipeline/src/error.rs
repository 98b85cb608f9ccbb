//! Error types for the pipeline

use thiserror::Error;

/// Startup and configuration failures
///
/// These are the only fatal errors in Lectern. Everything that can go wrong
/// while handling a document or a question is recovered as text instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The OCR engine cannot be started
    #[error("Tesseract not found at the specified path. Please check the path. ({0})")]
    OcrUnavailable(String),

    /// The inference service does not answer
    #[error("Could not connect to the Ollama model. Please ensure Ollama is running and the model is loaded correctly. ({0})")]
    InferenceUnavailable(String),

    /// The audit file cannot be opened for appending
    #[error("Failed to open audit log {path}: {source}")]
    AuditFile {
        /// Configured audit file
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}
