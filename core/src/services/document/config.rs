//! Configuration for the document service

use onboard_shared::config::DocumentConfig;

#[derive(Debug, Clone)]
pub struct DocumentServiceConfig {
    /// Largest accepted file, in bytes
    pub max_file_size_bytes: usize,
    /// Lower-case extensions accepted for upload
    pub allowed_extensions: Vec<String>,
}

impl Default for DocumentServiceConfig {
    fn default() -> Self {
        Self::from(&DocumentConfig::default())
    }
}

impl From<&DocumentConfig> for DocumentServiceConfig {
    fn from(config: &DocumentConfig) -> Self {
        Self {
            max_file_size_bytes: config.max_file_size_bytes,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
        }
    }
}
