//! Format module - classifying uploaded documents by extraction category

use std::fmt;
use std::path::{Path, PathBuf};

/// Extraction category of an uploaded document
///
/// The category decides which extraction strategy handles the document:
/// - Image: raster image, read with optical character recognition
/// - Pdf: page-structured PDF text
/// - Epub: e-book container with XHTML content items
/// - Unsupported: anything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCategory {
    /// PNG or JPEG raster image
    Image,

    /// Portable Document Format
    Pdf,

    /// EPUB e-book
    Epub,

    /// Unrecognized extension
    Unsupported,
}

/// Extensions recognized as raster images
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

impl FormatCategory {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatCategory::Image => "image",
            FormatCategory::Pdf => "pdf",
            FormatCategory::Epub => "epub",
            FormatCategory::Unsupported => "unsupported",
        }
    }

    /// Classify a bare extension (without the leading dot), ignoring case
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            FormatCategory::Image
        } else if ext == "pdf" {
            FormatCategory::Pdf
        } else if ext == "epub" {
            FormatCategory::Epub
        } else {
            FormatCategory::Unsupported
        }
    }

    /// Whether an extraction strategy exists for this category
    pub fn is_supported(&self) -> bool {
        !matches!(self, FormatCategory::Unsupported)
    }
}

impl fmt::Display for FormatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a document reference by its suffix
///
/// Pure and deterministic: only the text after the last `.` of the path is
/// inspected, the file itself is never touched. A bare dotfile name such as
/// `.pdf` still counts as a PDF.
///
/// # Examples
///
/// ```
/// use lectern_domain::{detect_format, FormatCategory};
///
/// assert_eq!(detect_format("scan.JPG"), FormatCategory::Image);
/// assert_eq!(detect_format("paper.pdf"), FormatCategory::Pdf);
/// assert_eq!(detect_format("novel.Epub"), FormatCategory::Epub);
/// assert_eq!(detect_format("notes.txt"), FormatCategory::Unsupported);
/// assert_eq!(detect_format("README"), FormatCategory::Unsupported);
/// ```
pub fn detect_format(path: impl AsRef<Path>) -> FormatCategory {
    let name = path.as_ref().to_string_lossy();
    match name.rsplit_once('.') {
        Some((_, suffix)) => FormatCategory::from_extension(suffix),
        None => FormatCategory::Unsupported,
    }
}

/// A document reference together with its inferred category
///
/// Lives only for the duration of one upload-and-extract operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Filesystem location of the document
    pub path: PathBuf,

    /// Category inferred from the path suffix
    pub format: FormatCategory,
}

impl Document {
    /// Create a document reference, detecting its format from the path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = detect_format(&path);
        Self { path, format }
    }

    /// File name component of the path, for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
