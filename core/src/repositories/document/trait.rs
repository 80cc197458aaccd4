//! Document repository trait

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::document::Document;
use crate::errors::DomainError;

/// Persistence for uploaded document metadata
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a document record
    async fn create(&self, document: Document) -> Result<Document, DomainError>;

    /// Documents uploaded by a customer, newest first
    async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Document>, DomainError>;
}
