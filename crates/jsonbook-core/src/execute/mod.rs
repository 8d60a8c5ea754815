//! Execution engine for jsonbook notebooks.
//!
//! # Architecture
//!
//! ```text
//! JsonKernel::execute_cells(store, document, ranges)
//!     │
//!     └── for each cell, in order
//!             │
//!             ├── NotebookStore::cell_text   (fetch current source)
//!             ├── ExecutionCounter::next     (assign execution order)
//!             └── CellExecution              (Pending → Running → Succeeded | Failed)
//!                     │
//!                     └── replace_output: application/json
//!                                       | application/x.notebook.error-traceback
//! ```
//!
//! # Module Structure
//!
//! - `context` - Execution counter and progress callbacks
//! - `execution` - Per-cell execution handle and error descriptions
//! - `kernel` - JsonKernel for sequential execution

mod context;
mod execution;
mod kernel;

pub use context::{ExecutionCallback, ExecutionCounter};
pub use execution::{CellError, CellExecution, ExecutionState};
pub use kernel::{ExecutionReport, JsonKernel};
