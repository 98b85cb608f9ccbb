//! Tesseract command-line wrapper

use crate::error::ExtractionError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Handle to an externally installed Tesseract executable
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    executable: PathBuf,
}

impl TesseractEngine {
    /// Create a handle for the given executable (bare name or path)
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Configured executable
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Check that the executable starts and reports a version
    ///
    /// Returns the first line of the version banner.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::OcrUnavailable` if the executable cannot be
    /// spawned or exits unsuccessfully.
    pub fn check_available(&self) -> Result<String, ExtractionError> {
        let output = Command::new(&self.executable)
            .arg("--version")
            .output()
            .map_err(|e| self.unavailable(e))?;

        if !output.status.success() {
            return Err(ExtractionError::OcrUnavailable(format!(
                "{} --version exited with {}",
                self.executable.display(),
                output.status
            )));
        }

        // Older releases print the banner on stderr
        let banner = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };

        Ok(banner.lines().next().unwrap_or("unknown").trim().to_string())
    }

    /// Run whole-image recognition on an image file and return raw text
    ///
    /// The engine runs with its defaults: automatic page segmentation and no
    /// language hint.
    pub fn recognize(&self, image: &Path) -> Result<String, ExtractionError> {
        debug!(image = %image.display(), "Running tesseract");

        let output = Command::new(&self.executable)
            .arg(image)
            .arg("stdout")
            .output()
            .map_err(|e| self.unavailable(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn unavailable(&self, e: std::io::Error) -> ExtractionError {
        ExtractionError::OcrUnavailable(format!("{}: {}", self.executable.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_unavailable() {
        let engine = TesseractEngine::new("/nonexistent/lectern/tesseract");
        assert!(matches!(
            engine.check_available(),
            Err(ExtractionError::OcrUnavailable(_))
        ));
    }

    #[test]
    fn test_recognize_with_missing_executable() {
        let engine = TesseractEngine::new("/nonexistent/lectern/tesseract");
        let err = engine.recognize(Path::new("scan.png")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/lectern/tesseract"));
    }

    #[test]
    #[ignore] // Only run when tesseract is installed
    fn test_check_available_integration() {
        let engine = TesseractEngine::new("tesseract");
        let banner = engine.check_available().unwrap();
        assert!(banner.to_lowercase().contains("tesseract"));
    }
}
