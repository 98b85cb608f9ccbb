//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default OCR executable, resolved through `PATH`
pub const DEFAULT_TESSERACT_PATH: &str = "tesseract";

/// Default line width used when rendering e-book markup as text
pub const DEFAULT_WRAP_WIDTH: usize = 10_000;

/// Configuration for the extraction strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Tesseract executable (bare name or absolute path)
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: PathBuf,

    /// Line width for EPUB markup-to-text rendering
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_tesseract_path() -> PathBuf {
    PathBuf::from(DEFAULT_TESSERACT_PATH)
}

fn default_wrap_width() -> usize {
    DEFAULT_WRAP_WIDTH
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tesseract_path.as_os_str().is_empty() {
            return Err("tesseract_path must not be empty".to_string());
        }
        if self.wrap_width == 0 {
            return Err("wrap_width must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            tesseract_path: default_tesseract_path(),
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tesseract_path, PathBuf::from("tesseract"));
    }

    #[test]
    fn test_empty_tesseract_path_rejected() {
        let config = ExtractorConfig {
            tesseract_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_wrap_width_rejected() {
        let config = ExtractorConfig {
            wrap_width: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ExtractorConfig =
            toml::from_str(r#"tesseract_path = "/opt/tesseract/bin/tesseract""#).unwrap();
        assert_eq!(
            config.tesseract_path,
            PathBuf::from("/opt/tesseract/bin/tesseract")
        );
        assert_eq!(config.wrap_width, DEFAULT_WRAP_WIDTH);
    }
}
