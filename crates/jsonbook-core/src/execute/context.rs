//! Shared execution state and progress callbacks.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::store::DocumentId;

use super::execution::CellError;

/// Monotonically increasing execution order.
///
/// Clones share the same count, so one counter can number executions
/// across several kernels or threads. Separate counters are independent.
///
/// # Example
///
/// ```
/// use jsonbook_core::execute::ExecutionCounter;
///
/// let counter = ExecutionCounter::new();
/// let shared = counter.clone();
///
/// assert_eq!(counter.next(), 1);
/// assert_eq!(shared.next(), 2);
/// assert_eq!(counter.current(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExecutionCounter {
    value: Arc<AtomicU32>,
}

impl ExecutionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next execution order. The first call returns 1.
    pub fn next(&self) -> u32 {
        self.value.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Last execution order handed out, or 0 if none.
    pub fn current(&self) -> u32 {
        self.value.load(Ordering::SeqCst)
    }

    /// Start numbering from 1 again.
    pub fn reset(&self) {
        self.value.store(0, Ordering::SeqCst);
    }
}

/// Callback trait for execution progress reporting.
pub trait ExecutionCallback: Send + Sync {
    /// Called when a cell starts executing.
    fn on_cell_started(&self, document: DocumentId, index: usize, execution_order: u32);

    /// Called when a cell's source evaluated successfully.
    fn on_cell_completed(&self, document: DocumentId, index: usize, execution_order: u32);

    /// Called when a cell's source failed to evaluate.
    fn on_cell_error(&self, document: DocumentId, index: usize, error: &CellError);
}
