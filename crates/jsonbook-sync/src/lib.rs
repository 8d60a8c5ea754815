//! Notebook codec for jsonbook.
//!
//! Converts between notebook files and the in-memory model.
//!
//! # Architecture
//!
//! ```text
//! notebook.json ──► bytes ──► RawNotebook ──► NotebookDocument
//!                                                    │
//! notebook.json ◄── bytes ◄── RawNotebook ◄──────────┘
//!                          (outputs flattened)
//! ```
//!
//! Loading fails soft: content that is not a notebook loads as an empty
//! document.

mod error;
mod raw;
mod serializer;

pub use error::{SyncError, SyncResult};
pub use raw::{RawCell, RawCellOutput, RawNotebook};
pub use serializer::{JsonSerializer, SerializerOptions, to_document, to_raw};

use std::fs;
use std::path::Path;

use jsonbook_core::NotebookDocument;

/// Read a notebook file.
///
/// Only I/O failures are errors; unreadable content loads as an empty
/// document.
pub fn read_notebook(
    serializer: &JsonSerializer,
    path: impl AsRef<Path>,
) -> SyncResult<NotebookDocument> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| SyncError::ReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let document = serializer.deserialize(&data);
    tracing::info!("Loaded {} ({} cells)", path.display(), document.len());
    Ok(document)
}

/// Write a notebook file, replacing any existing content.
pub fn write_notebook(
    serializer: &JsonSerializer,
    path: impl AsRef<Path>,
    document: &NotebookDocument,
) -> SyncResult<()> {
    let path = path.as_ref();
    let data = serializer.serialize(document)?;
    fs::write(path, data).map_err(|e| SyncError::WriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::info!("Saved {} ({} cells)", path.display(), document.len());
    Ok(())
}
