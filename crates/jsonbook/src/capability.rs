//! Capabilities a notebook host can register.
//!
//! Two independent interfaces, one implementation each.

use jsonbook_core::{
    CellRange, DocumentId, ExecutionReport, JsonKernel, NotebookDocument, NotebookStore, Result,
};
use jsonbook_sync::JsonSerializer;

/// Converts between persisted bytes and notebook documents.
pub trait NotebookSerializer {
    fn label(&self) -> &str;

    /// Load a document. Unreadable content loads as an empty document.
    fn deserialize(&self, data: &[u8]) -> NotebookDocument;

    fn serialize(&self, document: &NotebookDocument) -> Result<Vec<u8>>;
}

/// Executes cells of a document held in a store.
pub trait NotebookKernel {
    fn id(&self) -> &str;

    fn label(&self) -> &str;

    fn supported_languages(&self) -> &[String];

    fn execute_cells(
        &self,
        store: &mut NotebookStore,
        document: DocumentId,
        ranges: &[CellRange],
    ) -> Result<ExecutionReport>;
}

impl NotebookSerializer for JsonSerializer {
    fn label(&self) -> &str {
        JsonSerializer::label(self)
    }

    fn deserialize(&self, data: &[u8]) -> NotebookDocument {
        JsonSerializer::deserialize(self, data)
    }

    fn serialize(&self, document: &NotebookDocument) -> Result<Vec<u8>> {
        Ok(JsonSerializer::serialize(self, document)?)
    }
}

impl NotebookKernel for JsonKernel {
    fn id(&self) -> &str {
        JsonKernel::id(self)
    }

    fn label(&self) -> &str {
        JsonKernel::label(self)
    }

    fn supported_languages(&self) -> &[String] {
        JsonKernel::supported_languages(self)
    }

    fn execute_cells(
        &self,
        store: &mut NotebookStore,
        document: DocumentId,
        ranges: &[CellRange],
    ) -> Result<ExecutionReport> {
        JsonKernel::execute_cells(self, store, document, ranges)
    }
}

/// Supplies the kernels available for a view type.
#[derive(Debug)]
pub struct KernelProvider {
    label: String,
    kernel: JsonKernel,
}

impl KernelProvider {
    pub fn new(label: impl Into<String>, kernel: JsonKernel) -> Self {
        Self {
            label: label.into(),
            kernel,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn provide_kernels(&self) -> &[JsonKernel] {
        std::slice::from_ref(&self.kernel)
    }

    pub fn kernel(&self) -> &JsonKernel {
        &self.kernel
    }

    pub(crate) fn kernel_mut(&mut self) -> &mut JsonKernel {
        &mut self.kernel
    }
}
