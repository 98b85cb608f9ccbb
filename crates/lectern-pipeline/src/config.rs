//! Pipeline configuration loaded from TOML
//!
//! ```toml
//! [llm]
//! endpoint = "http://localhost:11434"
//! model = "mistral"
//! timeout_secs = 120
//! max_retries = 3
//!
//! [extraction]
//! tesseract_path = "tesseract"
//!
//! [prompt]
//! grounding_header = false
//!
//! [audit]
//! file = "/var/log/lectern/audit.log"
//! ```
//!
//! Every section and key is optional.

use crate::error::ConfigError;
use lectern_extractor::ExtractorConfig;
use lectern_llm::ollama::{
    DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use lectern_llm::OllamaProvider;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Inference service settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Extraction strategy settings
    #[serde(default)]
    pub extraction: ExtractorConfig,

    /// Prompt rendering settings
    #[serde(default)]
    pub prompt: PromptSettings,

    /// Audit trail settings
    #[serde(default)]
    pub audit: AuditSettings,
}

/// Settings for the Ollama adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Base URL of the Ollama API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name passed on every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request before a transient failure is reported
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Settings for prompt rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptSettings {
    /// Prepend the grounding instructions to every prompt
    #[serde(default)]
    pub grounding_header: bool,
}

/// Settings for the audit trail
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Append every entry to this file as well as keeping it in memory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl LlmSettings {
    /// Build the Ollama adapter these settings describe
    pub fn build_provider(&self) -> Result<OllamaProvider, ConfigError> {
        let provider = OllamaProvider::with_timeout(
            &self.endpoint,
            &self.model,
            Duration::from_secs(self.timeout_secs),
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(provider.with_max_retries(self.max_retries))
    }
}

impl PipelineConfig {
    /// Parse a configuration from TOML text and validate it
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges and cross-field consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.llm.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "llm.endpoint must be an http(s) URL, got '{}'",
                self.llm.endpoint
            )));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model must not be empty".to_string()));
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "llm.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.llm.max_retries == 0 {
            return Err(ConfigError::Invalid(
                "llm.max_retries must allow at least one attempt".to_string(),
            ));
        }
        self.extraction
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("extraction: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.llm.endpoint, "http://localhost:11434");
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.llm.timeout_secs, 120);
        assert_eq!(config.llm.max_retries, 3);
        assert!(!config.prompt.grounding_header);
        assert!(config.audit.file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [llm]
            endpoint = "http://gpu-box:11434"
            model = "llama2"
            timeout_secs = 30

            [extraction]
            tesseract_path = "/usr/local/bin/tesseract"

            [prompt]
            grounding_header = true

            [audit]
            file = "/tmp/lectern-audit.log"
        "#;

        let config = PipelineConfig::from_toml(toml).unwrap();
        assert_eq!(config.llm.endpoint, "http://gpu-box:11434");
        assert_eq!(config.llm.model, "llama2");
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.llm.max_retries, 3);
        assert_eq!(
            config.extraction.tesseract_path,
            PathBuf::from("/usr/local/bin/tesseract")
        );
        assert!(config.prompt.grounding_header);
        assert_eq!(
            config.audit.file.as_deref(),
            Some(Path::new("/tmp/lectern-audit.log"))
        );
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let result = PipelineConfig::from_toml("[llm]\nendpoint = \"localhost:11434\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = PipelineConfig::from_toml("[llm]\ntimeout_secs = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = PipelineConfig::from_toml("[llm\nmodel = ");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_to_toml_parses_back() {
        let mut config = PipelineConfig::default();
        config.llm.model = "phi3".to_string();
        config.prompt.grounding_header = true;

        let text = config.to_toml().unwrap();
        assert_eq!(PipelineConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_from_missing_file() {
        let result = PipelineConfig::from_file("/nonexistent/lectern/config.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_build_provider_uses_settings() {
        let settings = LlmSettings {
            endpoint: "http://example.invalid:11434/".to_string(),
            ..LlmSettings::default()
        };
        let provider = settings.build_provider().unwrap();
        assert_eq!(provider.endpoint(), "http://example.invalid:11434");
    }
}
