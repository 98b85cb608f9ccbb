//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Startup check or pipeline configuration failure
    #[error(transparent)]
    Pipeline(#[from] lectern_pipeline::ConfigError),

    /// Document could not be read
    #[error("Extraction failed: {0}")]
    Extraction(#[from] lectern_extractor::ExtractionError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Line editor failure
    #[error("Line editor error: {0}")]
    Readline(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
