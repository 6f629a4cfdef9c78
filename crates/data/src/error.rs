//! Error types for loading return series from delimited files.

use thiserror::Error;

/// Failures while reading a returns source.
#[derive(Debug, Error)]
pub enum SourceReadError {
    /// The configured delimiter is not a single ASCII character.
    #[error("delimiter {0:?} must be a single ASCII character")]
    InvalidDelimiter(char),

    /// The file could not be opened.
    #[error("failed to open returns file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid delimited text (bad UTF-8, ragged rows, I/O).
    #[error("malformed returns file {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// The header row has no field with the expected name.
    #[error("returns file {path} has no '{field}' column (found: {})", .available.join(", "))]
    MissingField {
        path: String,
        field: String,
        /// Header names that were present.
        available: Vec<String>,
    },

    /// A row has an empty cell in the returns column.
    #[error("{path}:{line}: missing value in '{field}' column")]
    MissingValue {
        path: String,
        line: u64,
        field: String,
    },

    /// A cell in the returns column is not a number.
    #[error("{path}:{line}: '{value}' in '{field}' column is not a number")]
    InvalidValue {
        path: String,
        line: u64,
        field: String,
        value: String,
    },
}
