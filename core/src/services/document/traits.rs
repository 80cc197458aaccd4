//! Trait for document blob storage integration

use async_trait::async_trait;

/// Object storage for uploaded document bytes
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any existing object
    async fn put(&self, key: &str, content_type: &str, bytes: &[u8]) -> Result<(), String>;

    /// Remove the object under `key`; a missing object is not an error
    async fn delete(&self, key: &str) -> Result<(), String>;
}
