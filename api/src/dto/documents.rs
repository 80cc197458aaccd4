use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use onboard_core::domain::entities::document::{Document, VerificationStatus};

/// `?customerId=` on the document routes; defaults to the token's customer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentQuery {
    #[serde(rename = "customerId")]
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUploadResponse {
    pub message: String,
    pub document_id: Uuid,
    pub verification_status: VerificationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub verification_status: VerificationStatus,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Document> for DocumentSummary {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            file_name: document.file_name,
            content_type: document.content_type,
            size_bytes: document.size_bytes,
            verification_status: document.verification_status,
            uploaded_at: document.uploaded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_response_wire_shape() {
        let body = serde_json::to_value(DocumentUploadResponse {
            message: "Document uploaded successfully".to_string(),
            document_id: Uuid::nil(),
            verification_status: VerificationStatus::Verified,
        })
        .unwrap();
        assert_eq!(body["verificationStatus"], "verified");
        assert!(body.get("documentId").is_some());
    }

    #[test]
    fn test_query_customer_id() {
        let id = Uuid::new_v4();
        let query: DocumentQuery =
            serde_json::from_value(json!({"customerId": id.to_string()})).unwrap();
        assert_eq!(query.customer_id, Some(id));

        let query: DocumentQuery = serde_json::from_value(json!({})).unwrap();
        assert!(query.customer_id.is_none());
    }
}
