//! Document service implementation

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::document::{file_extension, Document, DocumentKind};
use crate::errors::{DocumentError, DomainError, DomainResult};
use crate::repositories::{CustomerRepository, DocumentRepository};
use crate::services::clock::Clock;

use super::config::DocumentServiceConfig;
use super::traits::BlobStore;
use super::types::UploadedFile;

/// Accepts, checks and stores customer identity documents
pub struct DocumentService<C, R, B, K>
where
    C: CustomerRepository,
    R: DocumentRepository,
    B: BlobStore,
    K: Clock,
{
    customers: Arc<C>,
    documents: Arc<R>,
    store: Arc<B>,
    clock: Arc<K>,
    config: DocumentServiceConfig,
}

impl<C, R, B, K> DocumentService<C, R, B, K>
where
    C: CustomerRepository,
    R: DocumentRepository,
    B: BlobStore,
    K: Clock,
{
    pub fn new(
        customers: Arc<C>,
        documents: Arc<R>,
        store: Arc<B>,
        clock: Arc<K>,
        config: DocumentServiceConfig,
    ) -> Self {
        Self {
            customers,
            documents,
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &DocumentServiceConfig {
        &self.config
    }

    /// Store a customer's document and record whether it passed the check.
    ///
    /// A document that fails the format check is still stored, with status
    /// `Rejected`.
    ///
    /// # Errors
    /// * `DocumentError::NoFile` - no file, or an empty one
    /// * `DocumentError::CustomerNotFound` - unknown customer id
    /// * `DocumentError::FileTooLarge` - over the configured limit
    /// * `DocumentError::UnsupportedFileType` - extension not allowed
    pub async fn upload(
        &self,
        customer_id: Uuid,
        file: Option<UploadedFile>,
    ) -> DomainResult<Document> {
        let file = file
            .filter(|f| !f.bytes.is_empty())
            .ok_or(DocumentError::NoFile)?;

        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or(DocumentError::CustomerNotFound)?;

        if file.bytes.len() > self.config.max_file_size_bytes {
            return Err(DocumentError::FileTooLarge {
                max_bytes: self.config.max_file_size_bytes,
            }
            .into());
        }

        let extension = file_extension(&file.file_name).unwrap_or_default();
        if !self.config.allowed_extensions.contains(&extension) {
            return Err(DocumentError::UnsupportedFileType { extension }.into());
        }

        let content_type = file
            .content_type
            .clone()
            .or_else(|| DocumentKind::from_extension(&extension).map(|k| k.mime_type().to_string()))
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let now = self.clock.now();
        let mut document = Document::new(
            customer.id,
            &file.file_name,
            &extension,
            &content_type,
            file.bytes.len() as u64,
            now,
        );
        document.check_contents(&extension, &file.bytes, now);

        self.store
            .put(&document.storage_key, &content_type, &file.bytes)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to store document: {}", e)))?;

        let document = match self.documents.create(document.clone()).await {
            Ok(document) => document,
            Err(error) => {
                if let Err(e) = self.store.delete(&document.storage_key).await {
                    tracing::warn!(
                        storage_key = %document.storage_key,
                        error = %e,
                        "Failed to remove orphaned document blob"
                    );
                }
                return Err(error);
            }
        };

        tracing::info!(
            customer_id = %customer.id,
            document_id = %document.id,
            size_bytes = document.size_bytes,
            status = %document.verification_status,
            event = "document_uploaded",
            "Stored identity document"
        );

        Ok(document)
    }

    /// Documents a customer has uploaded, newest first
    pub async fn list_for_customer(&self, customer_id: Uuid) -> DomainResult<Vec<Document>> {
        self.customers
            .find_by_id(customer_id)
            .await?
            .ok_or(DocumentError::CustomerNotFound)?;
        self.documents.find_by_customer(customer_id).await
    }
}
