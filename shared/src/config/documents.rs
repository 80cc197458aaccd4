//! Identity document upload configuration

use serde::{Deserialize, Serialize};

/// Limits and storage location for uploaded documents
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Directory the local blob store writes into
    pub storage_dir: String,

    /// Largest accepted file, in bytes
    pub max_file_size_bytes: usize,

    /// Lower-case file extensions accepted for upload
    pub allowed_extensions: Vec<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            storage_dir: String::from("uploads"),
            max_file_size_bytes: 5 * 1024 * 1024,
            allowed_extensions: ["png", "jpg", "jpeg", "pdf"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}
