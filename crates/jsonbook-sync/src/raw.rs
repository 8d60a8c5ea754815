//! On-disk notebook shape.
//!
//! ```json
//! {
//!   "cells": [
//!     {
//!       "kind": 2,
//!       "language": "typescript",
//!       "value": "{\"a\": 1}",
//!       "editable": true,
//!       "outputs": [{ "mime": "application/json", "value": { "a": 1 } }]
//!     }
//!   ]
//! }
//! ```
//!
//! There is no version field; unknown fields are ignored.

use jsonbook_core::CellKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A persisted notebook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNotebook {
    #[serde(default)]
    pub cells: Vec<RawCell>,
}

/// A persisted cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCell {
    pub kind: CellKind,

    #[serde(default)]
    pub language: String,

    /// Cell source text.
    #[serde(default)]
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,

    /// Flat output list. `None` when the field is absent or null.
    #[serde(default)]
    pub outputs: Option<Vec<RawCellOutput>>,
}

/// A persisted output item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCellOutput {
    pub mime: String,

    #[serde(default)]
    pub value: Value,
}
