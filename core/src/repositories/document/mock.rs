//! In-memory implementation of DocumentRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::document::Document;
use crate::errors::DomainError;

use super::trait_::DocumentRepository;

#[derive(Clone, Default)]
pub struct MockDocumentRepository {
    documents: Arc<RwLock<HashMap<Uuid, Document>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock document repository unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for MockDocumentRepository {
    async fn create(&self, document: Document) -> Result<Document, DomainError> {
        self.check_available()?;
        self.documents
            .write()
            .await
            .insert(document.id, document.clone());
        Ok(document)
    }

    async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Document>, DomainError> {
        self.check_available()?;
        let documents = self.documents.read().await;
        let mut found: Vec<Document> = documents
            .values()
            .filter(|d| d.customer_id == customer_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(found)
    }
}
