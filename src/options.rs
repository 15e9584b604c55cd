//! Options for loading tabular layout data.

/// Options for reading CSV layout files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvOptions {
    /// Variant tag stamped on every row, replacing any `block_type` column
    pub block_type: Option<String>,

    /// Field delimiter; when unset, `,` (or tab for `.tsv` files)
    pub delimiter: Option<u8>,
}

impl CsvOptions {
    /// Create new CSV options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the variant tag for every row.
    pub fn with_block_type(mut self, block_type: impl Into<String>) -> Self {
        self.block_type = Some(block_type.into());
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub(crate) fn block_type(&self) -> Option<&str> {
        self.block_type.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_options_builder() {
        let options = CsvOptions::new()
            .with_block_type("rectangle")
            .with_delimiter(b';');

        assert_eq!(options.block_type, Some("rectangle".to_string()));
        assert_eq!(options.delimiter, Some(b';'));
    }

    #[test]
    fn test_csv_options_default() {
        let options = CsvOptions::default();
        assert!(options.block_type.is_none());
        assert!(options.delimiter.is_none());
    }
}
