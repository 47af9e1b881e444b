//! Defines the custom error types for the application.
//!
//! This uses `thiserror` as specified in `Cargo.toml` for clean,
//! boilerplate-free error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O Error: {1} - {0}")]
    Io(#[source] std::io::Error, String),

    #[error("Data Conversion Error: {0}")]
    DataConversion(#[from] DataError),

    #[error("Serialization Error: {0}")]
    Serialization(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Unsupported Format: {0}")]
    UnsupportedFormat(String),
}

// Implement From<io::Error> for easier error handling
impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err, "IO operation failed".to_string())
    }
}

/// Why on-disk content could not be turned into a domain object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("content is not a well-formed data file: {0}")]
    Malformed(String),

    #[error("illegal value: {0}")]
    IllegalValue(String),
}

impl DataError {
    /// Shorthand for an [`DataError::IllegalValue`] with an owned message.
    pub fn illegal(message: impl Into<String>) -> Self {
        DataError::IllegalValue(message.into())
    }

    /// The message for a required field that is absent from a record.
    pub fn missing_field(record: &str, field: &str) -> Self {
        DataError::IllegalValue(format!("{record}'s {field} field is missing"))
    }
}
