//! All error types for the dictsync crate.
//!
//! Lookup misses during an import (unknown keys, unknown language columns)
//! are not errors and never show up here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input is not valid {encoding}")]
    Decode { encoding: String },

    #[error("character {character:?} cannot be encoded as {encoding}")]
    Encode { encoding: String, character: char },

    #[error("no file provided")]
    MissingFile,

    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("dictionary changed since preview ({expected} change(s) previewed, {actual} now)")]
    StaleChangeSet { expected: usize, actual: usize },

    #[error("storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates a new storage error with optional source error
    pub fn storage_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Storage {
            message: message.into(),
            source,
        }
    }

    /// Creates a new invalid data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Error::InvalidData(message.into())
    }

    /// Whether the error was raised before the input could be parsed
    /// (missing file, wrong extension, undecodable bytes, malformed CSV).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::Csv(_)
                | Error::Decode { .. }
                | Error::MissingFile
                | Error::UnsupportedExtension(_)
                | Error::InvalidOption(_)
        )
    }
}
