//! Defines the error types for the data module.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Unsupported data format '{extension}' for {path:?}")]
    UnsupportedDataFormat { path: PathBuf, extension: String },
    #[error("Failed to read {path:?}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("Malformed table in {path:?}: {reason}")]
    Malformed { path: PathBuf, reason: String },
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumns { column: String, expected: usize, actual: usize },
}
