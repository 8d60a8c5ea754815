//! jsonbook: a minimal JSON notebook provider.
//!
//! Notebooks are stored as JSON files holding an ordered list of cells.
//! Executing a cell parses its source as JSON and attaches either the
//! parsed value or an error traceback as the cell's single output.
//!
//! # Quick Start
//!
//! ```
//! use jsonbook::{CellRange, NotebookProvider, NotebookStore, ProviderConfig};
//!
//! let provider = NotebookProvider::register(ProviderConfig::default()).unwrap();
//! let mut store = NotebookStore::new();
//!
//! let bytes = br#"{"cells":[{"kind":2,"value":"{\"a\":1}","language":"typescript","outputs":[]}]}"#;
//! let id = provider.load(&mut store, bytes);
//! provider.execute(&mut store, id, &[CellRange::single(0)]).unwrap();
//!
//! let cell = &store.get(id).unwrap().cells[0];
//! let output = cell.output_items().next().unwrap();
//! assert_eq!(output.mime, "application/json");
//! assert_eq!(output.value, serde_json::json!({"a": 1}));
//! ```
//!
//! For the model, store and kernel, see `jsonbook-core`; for the file
//! format, see `jsonbook-sync`.

mod capability;
mod provider;

pub use capability::{KernelProvider, NotebookKernel, NotebookSerializer};
pub use provider::NotebookProvider;

pub use jsonbook_core::{
    Cell, CellError, CellKind, CellOutput, CellOutputItem, CellRange, DocumentId, Error,
    ExecutionCallback, ExecutionCounter, ExecutionReport, ExecutionState, JsonKernel,
    MIME_ERROR_TRACEBACK, MIME_JSON, NotebookDocument, NotebookStore, ProviderConfig, Result,
};
pub use jsonbook_sync::{JsonSerializer, SerializerOptions, SyncError};
