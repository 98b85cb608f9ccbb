//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lectern_domain::{Document, FormatCategory, UNSUPPORTED_FORMAT_MESSAGE};
use lectern_extractor::ExtractorRegistry;
use lectern_pipeline::{preflight, PipelineConfig};

/// Execute the extract command.
///
/// Only the OCR engine is checked at startup, and only for images; the
/// model is never contacted.
pub fn execute_extract(
    args: ExtractArgs,
    config: &PipelineConfig,
    skip_preflight: bool,
    formatter: &Formatter,
) -> Result<()> {
    let document = Document::new(&args.file);
    if !document.format.is_supported() {
        return Err(CliError::InvalidInput(UNSUPPORTED_FORMAT_MESSAGE.to_string()));
    }

    if document.format == FormatCategory::Image && !skip_preflight {
        preflight::check_ocr(&config.extraction)?;
    }

    let registry = ExtractorRegistry::with_defaults(&config.extraction);
    let text = registry.extract(&document)?;

    if text.is_empty() {
        eprintln!("{}", formatter.warning("No text found"));
    } else {
        println!("{}", text);
    }
    Ok(())
}
