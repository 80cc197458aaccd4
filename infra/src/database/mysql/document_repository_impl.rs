//! MySQL implementation of the DocumentRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use onboard_core::domain::entities::document::{Document, VerificationStatus};
use onboard_core::errors::DomainError;
use onboard_core::repositories::DocumentRepository;

/// MySQL implementation of DocumentRepository
pub struct MySqlDocumentRepository {
    pool: MySqlPool,
}

impl MySqlDocumentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_document(row: &sqlx::mysql::MySqlRow) -> Result<Document, DomainError> {
        let id: String = Self::column(row, "id")?;
        let customer_id: String = Self::column(row, "customer_id")?;
        let status: String = Self::column(row, "verification_status")?;

        Ok(Document {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid document UUID: {}", e)))?,
            customer_id: Uuid::parse_str(&customer_id)
                .map_err(|e| DomainError::internal(format!("Invalid customer UUID: {}", e)))?,
            file_name: Self::column(row, "file_name")?,
            content_type: Self::column(row, "content_type")?,
            size_bytes: Self::column(row, "size_bytes")?,
            storage_key: Self::column(row, "storage_key")?,
            verification_status: status
                .parse::<VerificationStatus>()
                .map_err(DomainError::internal)?,
            uploaded_at: Self::column(row, "uploaded_at")?,
            verified_at: Self::column(row, "verified_at")?,
        })
    }

    fn column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        row.try_get(name)
            .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
    }
}

#[async_trait]
impl DocumentRepository for MySqlDocumentRepository {
    async fn create(&self, document: Document) -> Result<Document, DomainError> {
        let query = r#"
            INSERT INTO documents (
                id, customer_id, file_name, content_type, size_bytes, storage_key,
                verification_status, uploaded_at, verified_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(document.id.to_string())
            .bind(document.customer_id.to_string())
            .bind(&document.file_name)
            .bind(&document.content_type)
            .bind(document.size_bytes)
            .bind(&document.storage_key)
            .bind(document.verification_status.as_str())
            .bind(document.uploaded_at)
            .bind(document.verified_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to create document: {}", e)))?;

        Ok(document)
    }

    async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Document>, DomainError> {
        let query = r#"
            SELECT id, customer_id, file_name, content_type, size_bytes, storage_key,
                   verification_status, uploaded_at, verified_at
            FROM documents
            WHERE customer_id = ?
            ORDER BY uploaded_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(customer_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list documents: {}", e)))?;

        rows.iter().map(Self::row_to_document).collect()
    }
}
