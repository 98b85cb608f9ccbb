//! Lectern Extractor
//!
//! Converts uploaded documents into plain text for grounding answers.
//!
//! # Overview
//!
//! Each supported [`FormatCategory`](lectern_domain::FormatCategory) has one
//! [`ExtractionStrategy`]:
//!
//! - **Image** (`.png`, `.jpg`, `.jpeg`): decode, then whole-image OCR with an
//!   external Tesseract executable
//! - **PDF**: page text in page order, one line-separated segment per page
//! - **EPUB**: XHTML items in spine order, markup rendered to plain text
//!
//! # Architecture
//!
//! ```text
//! Document → ExtractorRegistry → ExtractionStrategy → text | ExtractionError
//! ```
//!
//! Strategies never panic past the registry; every failure is an
//! [`ExtractionError`] the caller turns into user-facing text.
//!
//! # Example Usage
//!
//! ```no_run
//! use lectern_domain::Document;
//! use lectern_extractor::{ExtractorConfig, ExtractorRegistry};
//!
//! let registry = ExtractorRegistry::with_defaults(&ExtractorConfig::default());
//! let text = registry.extract(&Document::new("paper.pdf"))?;
//! println!("{}", text);
//! # Ok::<(), lectern_extractor::ExtractionError>(())
//! ```

#![warn(missing_docs)]

mod config;
mod ebook;
mod error;
mod ocr;
mod pdf;
mod raster;
mod strategy;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;
#[cfg(test)]
mod tests;

pub use config::{ExtractorConfig, DEFAULT_TESSERACT_PATH, DEFAULT_WRAP_WIDTH};
pub use ebook::EpubStrategy;
pub use error::ExtractionError;
pub use ocr::TesseractEngine;
pub use pdf::PdfStrategy;
pub use raster::ImageStrategy;
pub use strategy::{ExtractionStrategy, ExtractorRegistry};
