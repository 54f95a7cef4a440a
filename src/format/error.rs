//! Error types for dataset and taxonomy file operations.

use thiserror::Error;

/// Errors that can occur while reading or writing the labelling files.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from the dataset header
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// Name of the missing column
        column: String,
    },

    /// Invalid file structure or content
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },

    /// Row index outside the dataset
    #[error("Row {index} out of range (dataset has {len} rows)")]
    RowOutOfRange {
        /// Requested row
        index: usize,
        /// Number of rows in the dataset
        len: usize,
    },
}

impl FormatError {
    /// Create an invalid format error with a message.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}
