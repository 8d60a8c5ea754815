//! Provider registration.
//!
//! A [`NotebookProvider`] bundles the serializer and the kernel provider
//! registered under one view type. Registration happens once; the
//! capabilities cannot be reconfigured afterwards.

use std::path::Path;

use jsonbook_core::{
    CellRange, DocumentId, ExecutionCallback, ExecutionReport, JsonKernel, NotebookStore,
    ProviderConfig, Result,
};
use jsonbook_sync::JsonSerializer;

use crate::capability::{KernelProvider, NotebookKernel, NotebookSerializer};

/// Serializer and kernel provider registered under a view type.
#[derive(Debug)]
pub struct NotebookProvider {
    config: ProviderConfig,
    serializer: JsonSerializer,
    kernel_provider: KernelProvider,
}

impl NotebookProvider {
    /// Register both capabilities under `config.view_type`.
    pub fn register(config: ProviderConfig) -> Result<Self> {
        config.validate()?;

        let serializer = JsonSerializer::from_config(&config);
        let kernel_provider = KernelProvider::new(
            config.provider_label.clone(),
            JsonKernel::from_config(&config),
        );

        tracing::info!(
            "Registered notebook provider '{}' (kernel '{}')",
            config.view_type,
            config.kernel_id
        );

        Ok(Self {
            config,
            serializer,
            kernel_provider,
        })
    }

    /// Install a progress callback on the provided kernel.
    ///
    /// Takes `self` by value so it can only be used while setting up.
    pub fn with_callback(mut self, callback: impl ExecutionCallback + 'static) -> Self {
        self.kernel_provider.kernel_mut().set_callback(callback);
        self
    }

    pub fn view_type(&self) -> &str {
        &self.config.view_type
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn serializer(&self) -> &dyn NotebookSerializer {
        &self.serializer
    }

    pub fn kernel_provider(&self) -> &KernelProvider {
        &self.kernel_provider
    }

    /// The kernel used by [`execute`](Self::execute).
    pub fn kernel(&self) -> &JsonKernel {
        self.kernel_provider.kernel()
    }

    /// Load bytes into `store` and return the new document's handle.
    pub fn load(&self, store: &mut NotebookStore, data: &[u8]) -> DocumentId {
        store.insert(self.serializer.deserialize(data))
    }

    /// Serialize a stored document.
    pub fn save(&self, store: &NotebookStore, document: DocumentId) -> Result<Vec<u8>> {
        NotebookSerializer::serialize(&self.serializer, store.get(document)?)
    }

    /// Read a notebook file into `store`.
    pub fn open(&self, store: &mut NotebookStore, path: impl AsRef<Path>) -> Result<DocumentId> {
        let document = jsonbook_sync::read_notebook(&self.serializer, path)?;
        Ok(store.insert(document))
    }

    /// Write a stored document to a notebook file.
    pub fn save_to_file(
        &self,
        store: &NotebookStore,
        document: DocumentId,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        jsonbook_sync::write_notebook(&self.serializer, path, store.get(document)?)?;
        Ok(())
    }

    /// Execute the cells in `ranges` with the provided kernel.
    pub fn execute(
        &self,
        store: &mut NotebookStore,
        document: DocumentId,
        ranges: &[CellRange],
    ) -> Result<ExecutionReport> {
        NotebookKernel::execute_cells(self.kernel(), store, document, ranges)
    }
}
