//! In-memory notebook model.
//!
//! A [`NotebookDocument`] is an ordered list of [`Cell`]s. Each cell carries
//! opaque source text, a language tag, and zero or more output groups
//! produced by execution.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MIME type of a successful JSON evaluation.
pub const MIME_JSON: &str = "application/json";

/// MIME type of an error traceback output.
pub const MIME_ERROR_TRACEBACK: &str = "application/x.notebook.error-traceback";

/// Kind of cell.
///
/// Serialized as the host's integer discriminant (`1` markup, `2` code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CellKind {
    /// Rendered documentation cell.
    Markup,
    /// Executable cell.
    Code,
}

impl From<CellKind> for u8 {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Markup => 1,
            CellKind::Code => 2,
        }
    }
}

impl TryFrom<u8> for CellKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CellKind::Markup),
            2 => Ok(CellKind::Code),
            other => Err(format!("unknown cell kind {other}")),
        }
    }
}

/// A single MIME-typed payload attached to a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellOutputItem {
    pub mime: String,
    pub value: Value,
}

impl CellOutputItem {
    pub fn new(mime: impl Into<String>, value: Value) -> Self {
        Self {
            mime: mime.into(),
            value,
        }
    }

    /// A successful JSON evaluation result.
    pub fn json(value: Value) -> Self {
        Self::new(MIME_JSON, value)
    }

    /// An error traceback in the host's `{ename, evalue, traceback}` shape.
    pub fn error(ename: impl Into<String>, evalue: impl Into<String>) -> Self {
        Self::new(
            MIME_ERROR_TRACEBACK,
            serde_json::json!({
                "ename": ename.into(),
                "evalue": evalue.into(),
                "traceback": [],
            }),
        )
    }
}

/// A group of output items produced together.
///
/// Group metadata lives in memory only; persisted notebooks store a flat
/// item list per cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellOutput {
    pub items: Vec<CellOutputItem>,
    pub metadata: Option<Value>,
}

impl CellOutput {
    pub fn new(items: Vec<CellOutputItem>) -> Self {
        Self {
            items,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Per-cell metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellMetadata {
    /// Whether the cell may be edited. `None` means unspecified.
    pub editable: Option<bool>,
}

/// Summary of the most recent execution of a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub execution_order: u32,
    /// `None` while the execution is still running.
    pub success: Option<bool>,
    /// Milliseconds since the Unix epoch.
    pub start_time: Option<u64>,
    /// Milliseconds since the Unix epoch.
    pub end_time: Option<u64>,
}

/// One unit of a notebook document.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    pub language: String,
    pub source: String,
    pub outputs: Vec<CellOutput>,
    pub metadata: CellMetadata,
    pub execution_summary: Option<ExecutionSummary>,
}

impl Cell {
    pub fn new(kind: CellKind, source: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            kind,
            language: language.into(),
            source: source.into(),
            outputs: Vec::new(),
            metadata: CellMetadata::default(),
            execution_summary: None,
        }
    }

    pub fn code(source: impl Into<String>, language: impl Into<String>) -> Self {
        Self::new(CellKind::Code, source, language)
    }

    pub fn markup(source: impl Into<String>) -> Self {
        Self::new(CellKind::Markup, source, "markdown")
    }

    pub fn with_outputs(mut self, outputs: Vec<CellOutput>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.metadata.editable = Some(editable);
        self
    }

    /// Cells are editable unless explicitly marked otherwise.
    pub fn is_editable(&self) -> bool {
        self.metadata.editable.unwrap_or(true)
    }

    /// All output items across every group, in order.
    pub fn output_items(&self) -> impl Iterator<Item = &CellOutputItem> {
        self.outputs.iter().flat_map(|output| output.items.iter())
    }
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    /// Whether cells display an execution order marker.
    pub cell_has_execution_order: bool,
}

/// An ordered sequence of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotebookDocument {
    pub cells: Vec<Cell>,
    pub metadata: DocumentMetadata,
}

impl NotebookDocument {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            metadata: DocumentMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    /// Cells covered by `range`, clamped to the document length.
    pub fn cells_in(&self, range: CellRange) -> &[Cell] {
        let end = range.end.min(self.cells.len());
        let start = range.start.min(end);
        &self.cells[start..end]
    }
}

/// Half-open range of cell indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub start: usize,
    pub end: usize,
}

impl CellRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Range covering exactly one cell.
    pub fn single(index: usize) -> Self {
        Self::new(index, index + 1)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Range<usize>> for CellRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
