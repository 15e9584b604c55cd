//! Input format detection.

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// Supported layout interchange formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON element, element list, or page layout
    Json,
    /// CSV table, one element per row
    Csv,
}

impl Format {
    /// Lowercase file extensions for this format, without the leading dot.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Format::Json => &["json"],
            Format::Csv => &["csv", "tsv"],
        }
    }

    /// Look up a format by file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        [Format::Json, Format::Csv]
            .into_iter()
            .find(|f| f.extensions().contains(&ext.as_str()))
    }

    /// Detect the format of a file from its extension.
    ///
    /// # Example
    /// ```
    /// use layoutio::Format;
    ///
    /// assert_eq!(Format::from_path("page.JSON").unwrap(), Format::Json);
    /// assert!(Format::from_path("page.xml").is_err());
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(format!("{} has no extension", path.display())))?;

        Self::from_extension(ext).ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))
    }

    /// Default field delimiter for tabular formats.
    pub(crate) fn default_delimiter(path: &Path) -> u8 {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "JSON"),
            Format::Csv => write!(f, "CSV"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("json"), Some(Format::Json));
        assert_eq!(Format::from_extension("CSV"), Some(Format::Csv));
        assert_eq!(Format::from_extension("tsv"), Some(Format::Csv));
        assert_eq!(Format::from_extension("pdf"), None);
    }

    #[test]
    fn test_from_path_without_extension() {
        let result = Format::from_path("layout");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_default_delimiter() {
        assert_eq!(Format::default_delimiter(Path::new("a.tsv")), b'\t');
        assert_eq!(Format::default_delimiter(Path::new("a.csv")), b',');
    }

    #[test]
    fn test_display() {
        assert_eq!(Format::Json.to_string(), "JSON");
        assert_eq!(Format::Csv.to_string(), "CSV");
    }
}
