//! Error types for PAFX to MSI conversion.

use crate::model::Orientation;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the converter.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Entry '{entry}' not found in archive {archive}")]
    MissingEntry { archive: PathBuf, entry: String },

    #[error("Invalid XML in '{entry}'")]
    Xml {
        entry: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Cannot decode '{entry}' as {encoding}")]
    Encoding { entry: String, encoding: String },

    #[error("Missing required field '{field}' in <{section}>")]
    MissingField { section: String, field: String },

    #[error("Invalid value for '{field}': expected {expected}, got '{value}'")]
    InvalidValue {
        field: String,
        expected: String,
        value: String,
    },

    #[error("{orientation} pattern lists {actual} gain value(s) but its angle range has {expected}")]
    GainCountMismatch {
        orientation: Orientation,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid angle step {step} in {orientation} pattern")]
    InvalidStep { orientation: Orientation, step: i64 },

    #[error("Invalid glob pattern '{pattern}'")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Malformed MSI at line {line}: {message}")]
    MsiParse { line: usize, message: String },

    #[error("Failed to convert {path}")]
    Archive {
        path: PathBuf,
        #[source]
        source: Box<ConvertError>,
    },

    #[error("In archive entry '{entry}'")]
    Entry {
        entry: String,
        #[source]
        source: Box<ConvertError>,
    },

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Attach the archive entry name in which this error happened.
    pub fn in_entry(self, entry: impl Into<String>) -> Self {
        ConvertError::Entry {
            entry: entry.into(),
            source: Box::new(self),
        }
    }

    /// Attach the archive path in which this error happened.
    pub fn in_archive(self, path: impl Into<PathBuf>) -> Self {
        ConvertError::Archive {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for a missing XML element.
    pub fn missing(section: &str, field: &str) -> Self {
        ConvertError::MissingField {
            section: section.to_string(),
            field: field.to_string(),
        }
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
