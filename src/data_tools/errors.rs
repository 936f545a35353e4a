//! Data tool errors

use serde::{Deserialize, Serialize};

/// Coarse failure category reported to the host alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unknown table, source, directory or record
    NotFound,
    /// Malformed filter, bad resolution option, missing tool argument
    InvalidArgument,
    /// LLM call failed or returned nothing usable
    UpstreamFailure,
    /// Filesystem or parse failure underneath a valid request
    Internal,
}

/// Errors raised by the CSV-backed data tools
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Data directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("No CSV file found matching: {name}")]
    SourceNotFound { name: String, searched_in: String },

    #[error("No data sources found in {0}")]
    EmptyStore(String),

    #[error("No record in '{table}' with {column} = '{value}'")]
    RecordNotFound {
        table: String,
        column: String,
        value: String,
    },

    #[error("Column '{column}' not found in {table}")]
    UnknownColumn {
        column: String,
        table: String,
        available: Vec<String>,
    },

    #[error("Invalid filter on column '{column}': {reason}")]
    InvalidFilter { column: String, reason: String },

    #[error("Invalid resolution option: {0}")]
    InvalidOption(String),

    #[error("CSV error in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Map to the host-facing error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::DirectoryNotFound(_)
            | DataError::SourceNotFound { .. }
            | DataError::EmptyStore(_)
            | DataError::RecordNotFound { .. } => ErrorKind::NotFound,
            DataError::UnknownColumn { .. }
            | DataError::InvalidFilter { .. }
            | DataError::InvalidOption(_) => ErrorKind::InvalidArgument,
            DataError::Csv { .. } | DataError::Io(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for data tool operations
pub type Result<T> = std::result::Result<T, DataError>;
