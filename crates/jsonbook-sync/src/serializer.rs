//! Conversion between persisted bytes and the notebook model.

use jsonbook_core::json::from_str_unbounded;
use jsonbook_core::{
    Cell, CellMetadata, CellOutput, CellOutputItem, DocumentMetadata, NotebookDocument,
    ProviderConfig,
};
use serde_json::Value;

use crate::error::{SyncError, SyncResult};
use crate::raw::{RawCell, RawCellOutput, RawNotebook};

/// Options controlling how notebooks are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializerOptions {
    /// Indent the written JSON.
    pub pretty: bool,
}

/// Codec between the on-disk JSON form and [`NotebookDocument`].
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    label: String,
    options: SerializerOptions,
}

impl JsonSerializer {
    pub fn new(label: impl Into<String>, options: SerializerOptions) -> Self {
        Self {
            label: label.into(),
            options,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(
            config.serializer_label.clone(),
            SerializerOptions {
                pretty: config.pretty_print,
            },
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> SerializerOptions {
        self.options
    }

    /// Load a notebook, substituting an empty one for unreadable content.
    ///
    /// Never fails. Use [`try_deserialize`](Self::try_deserialize) to tell a
    /// corrupt notebook apart from an empty one.
    pub fn deserialize(&self, data: &[u8]) -> NotebookDocument {
        match self.try_deserialize(data) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(
                    "Discarding unreadable notebook content ({} bytes): {}",
                    data.len(),
                    e
                );
                to_document(RawNotebook::default())
            }
        }
    }

    /// Load a notebook, reporting malformed content as an error.
    pub fn try_deserialize(&self, data: &[u8]) -> SyncResult<NotebookDocument> {
        let contents = String::from_utf8_lossy(data);
        let contents = contents.strip_prefix('\u{FEFF}').unwrap_or(&contents);
        let value: Value = from_str_unbounded(contents)?;

        let raw = match value {
            Value::Object(_) => serde_json::from_value::<RawNotebook>(value)?,
            other => {
                return Err(SyncError::InvalidNotebook(format!(
                    "expected a JSON object, found {}",
                    json_type_name(&other)
                )));
            }
        };

        let document = to_document(raw);
        tracing::debug!("Loaded notebook with {} cells", document.len());
        Ok(document)
    }

    /// Write a notebook as UTF-8 JSON.
    ///
    /// Output groups are flattened: each cell stores one list of items, so
    /// group boundaries and group metadata do not survive a save.
    pub fn serialize(&self, document: &NotebookDocument) -> SyncResult<Vec<u8>> {
        let raw = to_raw(document);
        let bytes = if self.options.pretty {
            serde_json::to_vec_pretty(&raw)?
        } else {
            serde_json::to_vec(&raw)?
        };
        tracing::debug!(
            "Serialized notebook with {} cells ({} bytes)",
            raw.cells.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::from_config(&ProviderConfig::default())
    }
}

/// Build the in-memory model from the persisted form.
pub fn to_document(raw: RawNotebook) -> NotebookDocument {
    let cells = raw.cells.into_iter().map(to_cell).collect();
    NotebookDocument::new(cells).with_metadata(DocumentMetadata {
        cell_has_execution_order: true,
    })
}

fn to_cell(raw: RawCell) -> Cell {
    let outputs = match raw.outputs {
        Some(items) if !items.is_empty() => vec![CellOutput::new(
            items
                .into_iter()
                .map(|item| CellOutputItem::new(item.mime, item.value))
                .collect(),
        )],
        _ => Vec::new(),
    };

    let mut cell = Cell::new(raw.kind, raw.value, raw.language).with_outputs(outputs);
    cell.metadata = CellMetadata {
        editable: Some(raw.editable.unwrap_or(true)),
    };
    cell
}

/// Build the persisted form from the in-memory model.
pub fn to_raw(document: &NotebookDocument) -> RawNotebook {
    RawNotebook {
        cells: document
            .cells
            .iter()
            .map(|cell| RawCell {
                kind: cell.kind,
                language: cell.language.clone(),
                value: cell.source.clone(),
                editable: cell.metadata.editable,
                outputs: Some(
                    cell.output_items()
                        .map(|item| RawCellOutput {
                            mime: item.mime.clone(),
                            value: item.value.clone(),
                        })
                        .collect(),
                ),
            })
            .collect(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
