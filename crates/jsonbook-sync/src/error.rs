//! Error types for the notebook codec.

use std::path::PathBuf;

/// Result type for codec operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while reading or writing notebooks.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Failed to read notebook file.
    #[error("Failed to read file {path}: {message}")]
    ReadError { path: PathBuf, message: String },

    /// Failed to write notebook file.
    #[error("Failed to write file {path}: {message}")]
    WriteError { path: PathBuf, message: String },

    /// Failed to serialize/deserialize JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Content is valid JSON but not a notebook.
    #[error("Invalid notebook: {0}")]
    InvalidNotebook(String),
}

impl From<SyncError> for jsonbook_core::Error {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::IoError(e) => jsonbook_core::Error::Io(e),
            other => jsonbook_core::Error::Serialization(other.to_string()),
        }
    }
}
