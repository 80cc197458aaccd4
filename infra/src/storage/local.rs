//! Filesystem blob store: each key maps to a file under a root directory.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use onboard_core::services::document::BlobStore;

use crate::InfrastructureError;

#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Use `root` as the storage directory, creating it if needed
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, InfrastructureError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            InfrastructureError::Storage(format!("cannot create {}: {}", root.display(), e))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for `key`; keys may only contain plain relative segments
    fn path_for(&self, key: &str) -> Result<PathBuf, String> {
        let relative = Path::new(key);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !plain {
            return Err(format!("invalid storage key: {}", key));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, content_type: &str, bytes: &[u8]) -> Result<(), String> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("cannot create {}: {}", parent.display(), e))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;

        tracing::debug!(
            key = key,
            content_type = content_type,
            size_bytes = bytes.len(),
            "Stored blob on local disk"
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("cannot remove {}: {}", path.display(), e)),
        }
    }
}
