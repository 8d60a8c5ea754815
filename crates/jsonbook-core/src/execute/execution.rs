//! Execution handle for a single cell.
//!
//! A [`CellExecution`] moves through `Pending → Running → Succeeded | Failed`
//! and writes its outputs and summary onto the cell it borrows. Terminal
//! states accept no further transitions.

use serde_json::Value;
use serde_json::error::Category;

use crate::error::{Error, Result};
use crate::model::{Cell, CellOutput, CellOutputItem, ExecutionSummary};

/// Lifecycle state of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl ExecutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExecutionState::Succeeded | ExecutionState::Failed)
    }
}

/// Description of a failed evaluation, reported as an error traceback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellError {
    pub ename: String,
    pub evalue: String,
}

impl CellError {
    /// Describe a JSON parse failure.
    ///
    /// Falls back to the error's position, stringified with four-space
    /// indentation, if the message is empty.
    pub fn from_json_error(err: &serde_json::Error) -> Self {
        let ename = match err.classify() {
            Category::Syntax | Category::Eof => "SyntaxError",
            Category::Io => "IOError",
            Category::Data => "DataError",
        };

        let message = err.to_string();
        let evalue = if message.is_empty() {
            let position = serde_json::json!({
                "line": err.line(),
                "column": err.column(),
            });
            to_string_indented(&position)
        } else {
            message
        };

        Self {
            ename: ename.to_string(),
            evalue,
        }
    }

    /// The traceback output item for this error.
    pub fn to_output_item(&self) -> CellOutputItem {
        CellOutputItem::error(&self.ename, &self.evalue)
    }
}

impl std::fmt::Display for CellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.ename, self.evalue)
    }
}

fn to_string_indented(value: &Value) -> String {
    use serde::Serialize;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    if value.serialize(&mut ser).is_err() {
        return "error".to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| "error".to_string())
}

/// Execution handle bound to one cell.
pub struct CellExecution<'a> {
    cell: &'a mut Cell,
    state: ExecutionState,
    execution_order: Option<u32>,
    start_time: Option<u64>,
}

impl<'a> CellExecution<'a> {
    pub fn new(cell: &'a mut Cell) -> Self {
        Self {
            cell,
            state: ExecutionState::Pending,
            execution_order: None,
            start_time: None,
        }
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    pub fn execution_order(&self) -> Option<u32> {
        self.execution_order
    }

    /// Source text of the bound cell.
    pub fn source(&self) -> &str {
        &self.cell.source
    }

    /// Record the execution order shown next to the cell.
    pub fn set_execution_order(&mut self, order: u32) -> Result<()> {
        if self.state.is_terminal() {
            return Err(Error::InvalidTransition {
                action: "set execution order",
                state: self.state,
            });
        }
        self.execution_order = Some(order);
        if self.state == ExecutionState::Running {
            if let Some(summary) = self.cell.execution_summary.as_mut() {
                summary.execution_order = order;
            }
        }
        Ok(())
    }

    /// Move to `Running`, stamping the start time on the cell.
    pub fn start(&mut self, start_time: u64) -> Result<()> {
        if self.state != ExecutionState::Pending {
            return Err(Error::InvalidTransition {
                action: "start",
                state: self.state,
            });
        }
        self.state = ExecutionState::Running;
        self.start_time = Some(start_time);
        self.cell.execution_summary = Some(ExecutionSummary {
            execution_order: self.execution_order.unwrap_or_default(),
            success: None,
            start_time: Some(start_time),
            end_time: None,
        });
        Ok(())
    }

    /// Replace every output group on the cell.
    pub fn replace_output(&mut self, outputs: Vec<CellOutput>) -> Result<()> {
        if self.state != ExecutionState::Running {
            return Err(Error::InvalidTransition {
                action: "replace output",
                state: self.state,
            });
        }
        self.cell.outputs = outputs;
        Ok(())
    }

    /// Finish the execution. Returns the terminal state.
    pub fn end(&mut self, success: bool, end_time: u64) -> Result<ExecutionState> {
        if self.state != ExecutionState::Running {
            return Err(Error::InvalidTransition {
                action: "end",
                state: self.state,
            });
        }
        self.state = if success {
            ExecutionState::Succeeded
        } else {
            ExecutionState::Failed
        };
        self.cell.execution_summary = Some(ExecutionSummary {
            execution_order: self.execution_order.unwrap_or_default(),
            success: Some(success),
            start_time: self.start_time,
            end_time: Some(end_time),
        });
        Ok(self.state)
    }
}
