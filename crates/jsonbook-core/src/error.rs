//! Error types for jsonbook-core.

use thiserror::Error;

use crate::execute::ExecutionState;
use crate::store::DocumentId;

/// Result type for jsonbook-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jsonbook-core.
#[derive(Debug, Error)]
pub enum Error {
    /// Document handle does not refer to a live document.
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Cell index is past the end of the document.
    #[error("cell {index} out of range for {document} ({len} cells)")]
    CellOutOfRange {
        document: DocumentId,
        index: usize,
        len: usize,
    },

    /// Cell range is reversed or extends past the end of the document.
    #[error("invalid cell range {start}..{end} for {document} ({len} cells)")]
    InvalidRange {
        document: DocumentId,
        start: usize,
        end: usize,
        len: usize,
    },

    /// Execution handle used out of order (e.g., ending before starting).
    #[error("invalid execution transition: cannot {action} while {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: ExecutionState,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid provider configuration.
    #[error("config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
