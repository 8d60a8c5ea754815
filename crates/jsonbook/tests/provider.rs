//! End-to-end tests: load → execute → save through a registered provider.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jsonbook::{
    CellError, CellRange, DocumentId, ExecutionCallback, MIME_ERROR_TRACEBACK, MIME_JSON,
    NotebookProvider, NotebookStore, ProviderConfig,
};
use serde_json::{Value, json};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn provider() -> NotebookProvider {
    init_tracing();
    NotebookProvider::register(ProviderConfig::default()).expect("default config registers")
}

#[test]
fn test_load_execute_save() {
    let provider = provider();
    let mut store = NotebookStore::new();

    let bytes =
        br#"{"cells":[{"kind":2,"value":"{\"a\":1}","language":"typescript","outputs":[]}]}"#;
    let id = provider.load(&mut store, bytes);

    let report = provider
        .execute(&mut store, id, &[CellRange::single(0)])
        .unwrap();
    assert_eq!(report.succeeded, 1);

    let saved: Value = serde_json::from_slice(&provider.save(&store, id).unwrap()).unwrap();
    assert_eq!(
        saved,
        json!({"cells": [{
            "kind": 2,
            "language": "typescript",
            "value": "{\"a\":1}",
            "editable": true,
            "outputs": [{"mime": MIME_JSON, "value": {"a": 1}}],
        }]})
    );
}

#[test]
fn test_deep_output_survives_reload() {
    let provider = provider();
    let mut store = NotebookStore::new();

    let depth = 127;
    let source = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let bytes = serde_json::to_vec(&json!({"cells": [
        {"kind": 2, "value": source, "language": "typescript"},
        {"kind": 2, "value": "1", "language": "typescript"},
    ]}))
    .unwrap();
    let id = provider.load(&mut store, &bytes);

    let report = provider
        .execute(&mut store, id, &[CellRange::new(0, 2)])
        .unwrap();
    assert_eq!(report.succeeded, 2);
    let saved = provider.save(&store, id).unwrap();

    let reloaded = provider.load(&mut store, &saved);
    let doc = store.get(reloaded).unwrap();
    assert_eq!(doc.cells.len(), 2);
    let items: Vec<_> = doc.cells[0].output_items().collect();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].mime, MIME_JSON);
    assert_eq!(items[0].value.to_string(), source);
}

#[test]
fn test_saved_keys_keep_source_order() {
    let provider = provider();
    let mut store = NotebookStore::new();

    let bytes =
        br#"{"cells":[{"kind":2,"value":"{\"b\":1,\"a\":2}","language":"typescript"}]}"#;
    let id = provider.load(&mut store, bytes);
    provider
        .execute(&mut store, id, &[CellRange::single(0)])
        .unwrap();

    let saved = String::from_utf8(provider.save(&store, id).unwrap()).unwrap();
    assert!(
        saved.contains(r#""value":{"b":1,"a":2}"#),
        "saved was: {saved}"
    );
}

#[test]
fn test_not_json_loads_empty() {
    let provider = provider();
    let mut store = NotebookStore::new();

    let id = provider.load(&mut store, b"not json");
    let doc = store.get(id).unwrap();
    assert!(doc.cells.is_empty());
    assert!(doc.metadata.cell_has_execution_order);
}

#[test]
fn test_failed_cell_persists_traceback() {
    let provider = provider();
    let mut store = NotebookStore::new();

    let bytes = br#"{"cells":[
        {"kind":2,"value":"{bad json","language":"typescript"},
        {"kind":2,"value":"[1,2]","language":"typescript"}
    ]}"#;
    let id = provider.load(&mut store, bytes);
    let report = provider
        .execute(&mut store, id, &[CellRange::new(0, 2)])
        .unwrap();
    assert_eq!((report.succeeded, report.failed), (1, 1));

    let saved = provider.save(&store, id).unwrap();
    let reloaded = provider.load(&mut store, &saved);
    let doc = store.get(reloaded).unwrap();

    let error = doc.cells[0].output_items().next().unwrap();
    assert_eq!(error.mime, MIME_ERROR_TRACEBACK);
    assert_eq!(error.value["ename"], "SyntaxError");
    assert_eq!(error.value["traceback"], json!([]));

    let result = doc.cells[1].output_items().next().unwrap();
    assert_eq!(result.value, json!([1, 2]));

    // Execution summaries are not persisted.
    assert!(doc.cells[0].execution_summary.is_none());
}

#[test]
fn test_file_roundtrip_with_pretty_config() {
    init_tracing();
    let config = ProviderConfig::from_json_str(r#"{"pretty_print": true}"#).unwrap();
    let provider = NotebookProvider::register(config).unwrap();
    let temp = TempDir::new().expect("Failed to create temp directory");

    let input = temp.path().join("input.json");
    fs::write(
        &input,
        r#"{"cells":[{"kind":2,"value":"true","language":"typescript","editable":false}]}"#,
    )
    .unwrap();

    let mut store = NotebookStore::new();
    let id = provider.open(&mut store, &input).unwrap();
    provider
        .execute(&mut store, id, &[CellRange::single(0)])
        .unwrap();

    let output = temp.path().join("output.json");
    provider.save_to_file(&store, id, &output).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("\n  "), "pretty output expected:\n{text}");

    let reopened = provider.open(&mut store, &output).unwrap();
    let cell = &store.get(reopened).unwrap().cells[0];
    assert!(!cell.is_editable());
    assert_eq!(cell.output_items().next().unwrap().value, json!(true));
}

#[test]
fn test_open_missing_file_is_error() {
    let provider = provider();
    let temp = TempDir::new().expect("Failed to create temp directory");
    let mut store = NotebookStore::new();

    assert!(provider.open(&mut store, temp.path().join("nope.json")).is_err());
    assert!(store.is_empty());
}

#[derive(Clone, Default)]
struct Counts {
    started: Arc<AtomicUsize>,
    errors: Arc<AtomicUsize>,
}

impl ExecutionCallback for Counts {
    fn on_cell_started(&self, _document: DocumentId, _index: usize, _order: u32) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_cell_completed(&self, _document: DocumentId, _index: usize, _order: u32) {}

    fn on_cell_error(&self, _document: DocumentId, _index: usize, _error: &CellError) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_callback_through_provider() {
    let counts = Counts::default();
    let provider = provider().with_callback(counts.clone());
    let mut store = NotebookStore::new();

    let bytes = br##"{"cells":[
        {"kind":2,"value":"1","language":"typescript"},
        {"kind":2,"value":"}","language":"typescript"},
        {"kind":1,"value":"# notes","language":"markdown"}
    ]}"##;
    let id = provider.load(&mut store, bytes);
    provider
        .execute(&mut store, id, &[CellRange::new(0, 3)])
        .unwrap();

    assert_eq!(counts.started.load(Ordering::SeqCst), 3);
    assert_eq!(counts.errors.load(Ordering::SeqCst), 2);
    assert_eq!(provider.kernel().counter().current(), 3);
}
