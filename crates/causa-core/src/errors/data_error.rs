//! Dataset loading and validation errors.

use super::error_code::{self, CausaErrorCode};

/// Errors raised while reading or validating a numeric dataset.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid JSON dataset: {0}")]
    Json(String),

    #[error("Dataset has no rows")]
    Empty,

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column name at position {0} is empty")]
    EmptyColumnName(usize),

    #[error("Column {column} has {actual} values, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Non-finite value in column {column} at row {row}")]
    NonFinite { column: String, row: usize },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

impl CausaErrorCode for DataError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownColumn(_) => error_code::UNKNOWN_VARIABLE,
            _ => error_code::DATA_ERROR,
        }
    }
}
