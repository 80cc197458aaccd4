//! In-memory blob store that keeps every object

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::traits::BlobStore;

/// Blob store double for tests and local development
#[derive(Debug, Clone, Default)]
pub struct MockBlobStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    /// Bytes stored under `key`
    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn put(&self, key: &str, _content_type: &str, bytes: &[u8]) -> Result<(), String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("mock blob store failure".to_string());
        }
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }
}
