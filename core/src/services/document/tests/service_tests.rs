//! Tests for the document service

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::customer::{Customer, NewCustomer};
use crate::domain::entities::document::VerificationStatus;
use crate::errors::{DocumentError, DomainError};
use crate::repositories::{
    CustomerRepository, DocumentRepository, MockCustomerRepository, MockDocumentRepository,
};
use crate::services::clock::ManualClock;
use crate::services::document::{
    DocumentService, DocumentServiceConfig, MockBlobStore, UploadedFile,
};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

type Service =
    DocumentService<MockCustomerRepository, MockDocumentRepository, MockBlobStore, ManualClock>;

struct Harness {
    service: Service,
    documents: Arc<MockDocumentRepository>,
    store: Arc<MockBlobStore>,
    customer: Customer,
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

async fn harness_with(config: DocumentServiceConfig) -> Harness {
    let customers = Arc::new(MockCustomerRepository::new());
    let documents = Arc::new(MockDocumentRepository::new());
    let store = Arc::new(MockBlobStore::new());
    let customer = Customer::new(
        NewCustomer {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "a@example.com".to_string(),
            password: "password123".to_string(),
            phone_no: String::new(),
            address: String::new(),
        },
        "hash".to_string(),
        t0(),
    );
    customers.create(customer.clone()).await.unwrap();

    let service = DocumentService::new(
        customers,
        documents.clone(),
        store.clone(),
        Arc::new(ManualClock::new(t0())),
        config,
    );
    Harness {
        service,
        documents,
        store,
        customer,
    }
}

async fn harness() -> Harness {
    harness_with(DocumentServiceConfig::default()).await
}

fn file(name: &str, bytes: &[u8]) -> Option<UploadedFile> {
    Some(UploadedFile {
        file_name: name.to_string(),
        content_type: None,
        bytes: bytes.to_vec(),
    })
}

#[tokio::test]
async fn test_upload_verifies_matching_file() {
    let h = harness().await;
    let document = h
        .service
        .upload(h.customer.id, file("sample.png", PNG))
        .await
        .unwrap();

    assert_eq!(document.verification_status, VerificationStatus::Verified);
    assert_eq!(document.verified_at, Some(t0()));
    assert_eq!(document.content_type, "image/png");
    assert_eq!(h.store.object(&document.storage_key), Some(PNG.to_vec()));

    let stored = h.documents.find_by_customer(h.customer.id).await.unwrap();
    assert_eq!(stored, vec![document]);
}

#[tokio::test]
async fn test_upload_with_wrong_contents_is_rejected_but_kept() {
    let h = harness().await;
    let document = h
        .service
        .upload(h.customer.id, file("scan.pdf", b"plain text, not a pdf"))
        .await
        .unwrap();

    assert_eq!(document.verification_status, VerificationStatus::Rejected);
    assert_eq!(h.documents.len().await, 1);
    assert_eq!(h.store.object_count(), 1);
}

#[tokio::test]
async fn test_missing_or_empty_file() {
    let h = harness().await;

    let result = h.service.upload(h.customer.id, None).await;
    assert!(matches!(result, Err(DomainError::Document(DocumentError::NoFile))));

    let result = h.service.upload(h.customer.id, file("empty.png", b"")).await;
    assert!(matches!(result, Err(DomainError::Document(DocumentError::NoFile))));
    assert!(h.documents.is_empty().await);
}

#[tokio::test]
async fn test_unknown_customer() {
    let h = harness().await;
    let result = h.service.upload(Uuid::new_v4(), file("sample.png", PNG)).await;
    assert!(matches!(
        result,
        Err(DomainError::Document(DocumentError::CustomerNotFound))
    ));
    assert_eq!(h.store.object_count(), 0);
}

#[tokio::test]
async fn test_size_and_type_limits() {
    let h = harness_with(DocumentServiceConfig {
        max_file_size_bytes: 8,
        allowed_extensions: vec!["png".to_string()],
    })
    .await;

    let result = h.service.upload(h.customer.id, file("sample.png", PNG)).await;
    assert!(matches!(
        result,
        Err(DomainError::Document(DocumentError::FileTooLarge { max_bytes: 8 }))
    ));

    let result = h.service.upload(h.customer.id, file("tool.exe", b"MZ")).await;
    assert!(matches!(
        result,
        Err(DomainError::Document(DocumentError::UnsupportedFileType { ref extension })) if extension == "exe"
    ));
}

#[tokio::test]
async fn test_store_failure_is_internal() {
    let h = harness().await;
    h.store.set_failing(true);

    let result = h.service.upload(h.customer.id, file("sample.png", PNG)).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert!(h.documents.is_empty().await);
}

#[tokio::test]
async fn test_repository_failure_removes_blob() {
    let h = harness().await;
    h.documents.set_unavailable(true);

    let result = h.service.upload(h.customer.id, file("sample.png", PNG)).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert_eq!(h.store.object_count(), 0);
}

#[tokio::test]
async fn test_list_for_customer() {
    let h = harness().await;
    h.service
        .upload(h.customer.id, file("sample.png", PNG))
        .await
        .unwrap();

    let listed = h.service.list_for_customer(h.customer.id).await.unwrap();
    assert_eq!(listed.len(), 1);

    let result = h.service.list_for_customer(Uuid::new_v4()).await;
    assert!(matches!(
        result,
        Err(DomainError::Document(DocumentError::CustomerNotFound))
    ));
}
