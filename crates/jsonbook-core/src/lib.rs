//! Core engine for jsonbook notebooks.
//!
//! This crate provides:
//! - The in-memory notebook model (documents, cells, output groups)
//! - A caller-owned document store addressed by opaque handles
//! - Provider configuration
//! - The JSON kernel and its per-cell execution state machine

pub mod config;
pub mod error;
pub mod execute;
pub mod json;
pub mod model;
pub mod store;

pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use execute::{
    CellError, CellExecution, ExecutionCallback, ExecutionCounter, ExecutionReport,
    ExecutionState, JsonKernel,
};
pub use model::{
    Cell, CellKind, CellMetadata, CellOutput, CellOutputItem, CellRange, DocumentMetadata,
    ExecutionSummary, MIME_ERROR_TRACEBACK, MIME_JSON, NotebookDocument,
};
pub use store::{DocumentId, NotebookStore};
