//! JSON evaluation kernel.
//!
//! Executes cells by parsing their source as JSON. Each execution replaces
//! the cell's outputs with exactly one item: the parsed value on success,
//! an error traceback on failure.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::json;
use crate::model::{CellOutput, CellOutputItem, CellRange};
use crate::store::{DocumentId, NotebookStore};

use super::context::{ExecutionCallback, ExecutionCounter};
use super::execution::{CellError, CellExecution, ExecutionState};

/// Outcome counts of an [`execute_cells`](JsonKernel::execute_cells) request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub executed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Kernel that evaluates cell sources as JSON.
pub struct JsonKernel {
    id: String,
    label: String,
    supported_languages: Vec<String>,
    counter: ExecutionCounter,
    callback: Option<Box<dyn ExecutionCallback>>,
}

impl JsonKernel {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        supported_languages: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            supported_languages,
            counter: ExecutionCounter::new(),
            callback: None,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(
            config.kernel_id.clone(),
            config.kernel_label.clone(),
            config.supported_languages.clone(),
        )
    }

    /// Number executions with a counter shared with other kernels.
    pub fn with_counter(mut self, counter: ExecutionCounter) -> Self {
        self.counter = counter;
        self
    }

    /// Set the execution callback for progress reporting.
    pub fn set_callback(&mut self, callback: impl ExecutionCallback + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn supported_languages(&self) -> &[String] {
        &self.supported_languages
    }

    /// Whether cells tagged with `language` are meant for this kernel.
    ///
    /// Advisory only: execution never checks the language.
    pub fn supports_language(&self, language: &str) -> bool {
        self.supported_languages.iter().any(|l| l == language)
    }

    pub fn counter(&self) -> &ExecutionCounter {
        &self.counter
    }

    /// Execute every cell in `ranges`, strictly one after another.
    ///
    /// All ranges are validated before the first cell runs. A cell whose
    /// source fails to parse is marked failed; its siblings still run.
    pub fn execute_cells(
        &self,
        store: &mut NotebookStore,
        document: DocumentId,
        ranges: &[CellRange],
    ) -> Result<ExecutionReport> {
        let resolved = ranges
            .iter()
            .map(|range| store.resolve_range(document, *range))
            .collect::<Result<Vec<_>>>()?;

        let mut report = ExecutionReport::default();
        for range in resolved {
            for index in range {
                match self.execute_cell(store, document, index)? {
                    ExecutionState::Succeeded => report.succeeded += 1,
                    _ => report.failed += 1,
                }
                report.executed += 1;
            }
        }

        tracing::debug!(
            "Executed {} cells in {} ({} succeeded, {} failed)",
            report.executed,
            document,
            report.succeeded,
            report.failed
        );
        Ok(report)
    }

    /// Execute one cell and return its terminal state.
    ///
    /// Returns an error only if the document or cell does not exist, in
    /// which case neither the outputs nor the counter are touched.
    pub fn execute_cell(
        &self,
        store: &mut NotebookStore,
        document: DocumentId,
        index: usize,
    ) -> Result<ExecutionState> {
        let source = store.cell_text(document, index)?;

        let doc = store.get_mut(document)?;
        let len = doc.len();
        let cell = doc.cell_mut(index).ok_or(Error::CellOutOfRange {
            document,
            index,
            len,
        })?;

        let order = self.counter.next();
        let start_time = now_millis();

        let mut execution = CellExecution::new(cell);
        execution.set_execution_order(order)?;
        execution.start(start_time)?;

        if let Some(ref callback) = self.callback {
            callback.on_cell_started(document, index, order);
        }

        let state = match json::from_str_unbounded::<Value>(&source) {
            Ok(value) => {
                let metadata = serde_json::json!({ "startTime": start_time });
                execution.replace_output(vec![
                    CellOutput::new(vec![CellOutputItem::json(value)]).with_metadata(metadata),
                ])?;
                let state = execution.end(true, now_millis())?;

                tracing::debug!("Cell {} of {} succeeded [{}]", index, document, order);
                if let Some(ref callback) = self.callback {
                    callback.on_cell_completed(document, index, order);
                }
                state
            }
            Err(e) => {
                let error = CellError::from_json_error(&e);
                execution.replace_output(vec![CellOutput::new(vec![error.to_output_item()])])?;
                let state = execution.end(false, now_millis())?;

                tracing::debug!("Cell {} of {} failed [{}]: {}", index, document, order, error);
                if let Some(ref callback) = self.callback {
                    callback.on_cell_error(document, index, &error);
                }
                state
            }
        };

        Ok(state)
    }
}

impl std::fmt::Debug for JsonKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonKernel")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("supported_languages", &self.supported_languages)
            .field("counter", &self.counter.current())
            .finish()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, MIME_ERROR_TRACEBACK, MIME_JSON, NotebookDocument};

    fn kernel() -> JsonKernel {
        JsonKernel::from_config(&ProviderConfig::default())
    }

    fn store_with(sources: &[&str]) -> (NotebookStore, DocumentId) {
        let mut store = NotebookStore::new();
        let cells = sources
            .iter()
            .map(|s| Cell::code(*s, "typescript"))
            .collect();
        let id = store.insert(NotebookDocument::new(cells));
        (store, id)
    }

    #[test]
    fn test_execute_valid_json() {
        let (mut store, id) = store_with(&[r#"{"a":1}"#]);
        let state = kernel().execute_cell(&mut store, id, 0).unwrap();
        assert_eq!(state, ExecutionState::Succeeded);

        let cell = &store.get(id).unwrap().cells[0];
        assert_eq!(cell.outputs.len(), 1);
        let items: Vec<_> = cell.output_items().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].mime, MIME_JSON);
        assert_eq!(items[0].value, serde_json::json!({"a": 1}));
        assert!(cell.outputs[0].metadata.as_ref().unwrap()["startTime"].is_u64());
        assert_eq!(cell.execution_summary.as_ref().unwrap().success, Some(true));
    }

    #[test]
    fn test_execute_invalid_json() {
        let (mut store, id) = store_with(&["{bad json"]);
        let state = kernel().execute_cell(&mut store, id, 0).unwrap();
        assert_eq!(state, ExecutionState::Failed);

        let cell = &store.get(id).unwrap().cells[0];
        let items: Vec<_> = cell.output_items().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].mime, MIME_ERROR_TRACEBACK);
        assert_eq!(items[0].value["ename"], "SyntaxError");
        assert!(!items[0].value["evalue"].as_str().unwrap().is_empty());
        assert_eq!(items[0].value["traceback"], serde_json::json!([]));
        assert_eq!(cell.execution_summary.as_ref().unwrap().success, Some(false));
    }

    #[test]
    fn test_outputs_are_replaced() {
        let (mut store, id) = store_with(&["1"]);
        let kernel = kernel();
        kernel.execute_cell(&mut store, id, 0).unwrap();
        kernel.execute_cell(&mut store, id, 0).unwrap();

        let cell = &store.get(id).unwrap().cells[0];
        assert_eq!(cell.outputs.len(), 1);
        assert_eq!(cell.execution_summary.as_ref().unwrap().execution_order, 2);
    }

    #[test]
    fn test_missing_cell_does_not_consume_order() {
        let (mut store, id) = store_with(&["1"]);
        let kernel = kernel();

        assert!(kernel.execute_cell(&mut store, id, 3).is_err());
        assert!(
            kernel
                .execute_cell(&mut store, DocumentId::new(99), 0)
                .is_err()
        );
        assert_eq!(kernel.counter().current(), 0);
    }

    #[test]
    fn test_failure_does_not_abort_siblings() {
        let (mut store, id) = store_with(&["1", "nope", "[true]"]);
        let report = kernel()
            .execute_cells(&mut store, id, &[CellRange::new(0, 3)])
            .unwrap();

        assert_eq!(
            report,
            ExecutionReport {
                executed: 3,
                succeeded: 2,
                failed: 1,
            }
        );
    }

    #[test]
    fn test_invalid_range_runs_nothing() {
        let (mut store, id) = store_with(&["1", "2"]);
        let kernel = kernel();
        let result =
            kernel.execute_cells(&mut store, id, &[CellRange::new(0, 1), CellRange::new(1, 5)]);

        assert!(matches!(result, Err(Error::InvalidRange { .. })));
        assert_eq!(kernel.counter().current(), 0);
        assert!(store.get(id).unwrap().cells[0].outputs.is_empty());
    }

    #[test]
    fn test_supports_language() {
        let kernel = kernel();
        assert!(kernel.supports_language("typescript"));
        assert!(!kernel.supports_language("python"));
    }
}
