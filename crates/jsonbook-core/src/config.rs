//! Provider configuration.
//!
//! Identifiers and labels under which the serializer and kernel are
//! registered. Every field has a default, so a partial JSON object is a
//! valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// View type both capabilities are registered under.
pub const DEFAULT_VIEW_TYPE: &str = "typescript-notebook";

/// Identifier of the JSON kernel.
pub const DEFAULT_KERNEL_ID: &str = "typescript-kernel";

/// Registration settings for a notebook provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub view_type: String,
    pub serializer_label: String,
    pub kernel_id: String,
    pub kernel_label: String,
    /// Label of the provider that offers the kernel.
    pub provider_label: String,
    pub supported_languages: Vec<String>,
    /// Pretty-print saved notebooks instead of emitting compact JSON.
    pub pretty_print: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            view_type: DEFAULT_VIEW_TYPE.to_string(),
            serializer_label: "TypeScript Content Serializer".to_string(),
            kernel_id: DEFAULT_KERNEL_ID.to_string(),
            kernel_label: "TypeScript Notebook Kernel".to_string(),
            provider_label: "TypeScript Kernel Provider".to_string(),
            supported_languages: vec!["typescript".to_string()],
            pretty_print: false,
        }
    }
}

impl ProviderConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Reject configurations that could not be registered.
    pub fn validate(&self) -> Result<()> {
        if self.view_type.trim().is_empty() {
            return Err(Error::Config("view_type must not be empty".to_string()));
        }
        if self.kernel_id.trim().is_empty() {
            return Err(Error::Config("kernel_id must not be empty".to_string()));
        }
        Ok(())
    }
}
