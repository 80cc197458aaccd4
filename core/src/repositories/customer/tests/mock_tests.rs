//! Tests for the in-memory customer repository

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::entities::customer::{Customer, NewCustomer};
use crate::errors::{AuthError, DomainError};
use crate::repositories::customer::{CustomerRepository, MockCustomerRepository};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn customer(email: &str) -> Customer {
    let mut c = Customer::new(
        NewCustomer {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
            phone_no: "1234567890".to_string(),
            address: "1 Test St".to_string(),
        },
        "hash".to_string(),
        t0(),
    );
    c.assign_otp("111111".to_string(), t0());
    c
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = MockCustomerRepository::new();
    let created = repo.create(customer("a@example.com")).await.unwrap();

    let by_email = repo.find_by_email("a@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "a@example.com");

    assert!(repo.exists_by_email("a@example.com").await.unwrap());
    assert!(!repo.exists_by_email("b@example.com").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = MockCustomerRepository::new();
    repo.create(customer("a@example.com")).await.unwrap();

    let result = repo.create(customer("a@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_rotate_otp_is_conditional() {
    let repo = MockCustomerRepository::new();
    let c = repo.create(customer("a@example.com")).await.unwrap();
    let later = t0() + Duration::seconds(31);

    assert!(repo.rotate_otp(c.id, t0(), "222222", later).await.unwrap());
    // Second writer still holding the stale timestamp loses
    assert!(!repo.rotate_otp(c.id, t0(), "333333", later).await.unwrap());

    let stored = repo.find_by_id(c.id).await.unwrap().unwrap();
    assert_eq!(stored.otp.as_deref(), Some("222222"));
    assert_eq!(stored.otp_issued_at, later);
}

#[tokio::test]
async fn test_mark_verified_is_conditional() {
    let repo = MockCustomerRepository::new();
    let c = repo.create(customer("a@example.com")).await.unwrap();

    assert!(!repo.mark_verified(c.id, "999999", t0()).await.unwrap());
    assert!(repo.mark_verified(c.id, "111111", t0()).await.unwrap());
    assert!(!repo.mark_verified(c.id, "111111", t0()).await.unwrap());

    let stored = repo.find_by_id(c.id).await.unwrap().unwrap();
    assert!(stored.is_verified);
    assert!(stored.otp.is_none());

    // A later resend stores a fresh code without touching the flag
    assert!(repo
        .rotate_otp(c.id, stored.otp_issued_at, "444444", t0() + Duration::seconds(60))
        .await
        .unwrap());
    let stored = repo.find_by_id(c.id).await.unwrap().unwrap();
    assert!(stored.is_verified);
    assert_eq!(stored.otp.as_deref(), Some("444444"));
    assert_eq!(stored.verified_at, Some(t0()));
}

#[tokio::test]
async fn test_unavailable_repository_fails() {
    let repo = MockCustomerRepository::new();
    repo.set_unavailable(true);

    let result = repo.find_by_email("a@example.com").await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));

    repo.set_unavailable(false);
    assert!(repo.find_by_email("a@example.com").await.unwrap().is_none());
}
