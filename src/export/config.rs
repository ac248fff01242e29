//! Export configuration

use super::tables::Table;
use std::path::{Path, PathBuf};

/// Column separator used by the bulk loader
pub const DEFAULT_DELIMITER: char = '|';

/// Only paths ending in this suffix are treated as export documents
pub const DEFAULT_EXTENSION: &str = ".json";

/// Configuration for the export process
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory holding the four table files
    pub output_dir: PathBuf,

    /// Field separator within a row
    pub delimiter: char,

    /// Suffix a path must end with to be processed
    pub extension: String,
}

impl ExportConfig {
    /// Create a new export configuration with the default delimiter and extension
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            delimiter: DEFAULT_DELIMITER,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Set the field separator
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the document suffix
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Path of a table file
    pub fn table_path(&self, table: Table) -> PathBuf {
        self.output_dir.join(table.file_name())
    }

    /// Whether a path names an export document
    ///
    /// The path must be strictly longer than the suffix, so a file named
    /// just ".json" is skipped.
    pub fn is_source_document(&self, path: &Path) -> bool {
        let name = path.to_string_lossy();
        name.len() > self.extension.len() && name.ends_with(self.extension.as_str())
    }
}
