//! Caller-owned table of open notebook documents.
//!
//! Documents are referenced by opaque [`DocumentId`] handles instead of a
//! process-wide registry keyed by URI.

use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::model::{CellRange, NotebookDocument};

/// Handle to a document held in a [`NotebookStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(usize);

impl DocumentId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "doc_{}", self.0)
    }
}

/// Arena of live notebook documents.
#[derive(Debug, Default)]
pub struct NotebookStore {
    documents: FxHashMap<DocumentId, NotebookDocument>,
    next_id: usize,
}

impl NotebookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a document and return its handle.
    ///
    /// Handles are never reused, even after [`remove`](Self::remove).
    pub fn insert(&mut self, document: NotebookDocument) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        tracing::debug!("Opened {} ({} cells)", id, document.len());
        self.documents.insert(id, document);
        id
    }

    pub fn get(&self, id: DocumentId) -> Result<&NotebookDocument> {
        self.documents.get(&id).ok_or(Error::DocumentNotFound(id))
    }

    pub fn get_mut(&mut self, id: DocumentId) -> Result<&mut NotebookDocument> {
        self.documents
            .get_mut(&id)
            .ok_or(Error::DocumentNotFound(id))
    }

    /// Close a document, returning it to the caller.
    pub fn remove(&mut self, id: DocumentId) -> Result<NotebookDocument> {
        self.documents
            .remove(&id)
            .ok_or(Error::DocumentNotFound(id))
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Handles of all open documents, in insertion order.
    pub fn ids(&self) -> Vec<DocumentId> {
        let mut ids: Vec<_> = self.documents.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Current source text of a cell.
    pub fn cell_text(&self, id: DocumentId, index: usize) -> Result<String> {
        let document = self.get(id)?;
        document
            .cell(index)
            .map(|cell| cell.source.clone())
            .ok_or(Error::CellOutOfRange {
                document: id,
                index,
                len: document.len(),
            })
    }

    /// Validate `range` against the document and return concrete indices.
    pub fn resolve_range(&self, id: DocumentId, range: CellRange) -> Result<Range<usize>> {
        let len = self.get(id)?.len();
        if range.start > range.end || range.end > len {
            return Err(Error::InvalidRange {
                document: id,
                start: range.start,
                end: range.end,
                len,
            });
        }
        Ok(range.start..range.end)
    }
}
