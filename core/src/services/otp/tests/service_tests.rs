//! Tests for the OTP lifecycle service

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use onboard_shared::config::VerifiedResubmission;

use crate::domain::entities::customer::{Customer, NewCustomer, OtpState};
use crate::errors::{DomainError, OtpError};
use crate::repositories::{CustomerRepository, MockCustomerRepository};
use crate::services::clock::{Clock, ManualClock};
use crate::services::otp::{
    MockOtpDelivery, OtpLifecycleConfig, OtpLifecycleService, OtpPurpose, VerifyOutcome,
};

type Service = OtpLifecycleService<MockCustomerRepository, MockOtpDelivery, ManualClock>;

struct Harness {
    service: Service,
    repository: Arc<MockCustomerRepository>,
    delivery: Arc<MockOtpDelivery>,
    clock: Arc<ManualClock>,
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn harness_with(config: OtpLifecycleConfig) -> Harness {
    let repository = Arc::new(MockCustomerRepository::new());
    let delivery = Arc::new(MockOtpDelivery::new());
    let clock = Arc::new(ManualClock::new(t0()));
    let service = OtpLifecycleService::new(repository.clone(), delivery.clone(), clock.clone(), config);
    Harness {
        service,
        repository,
        delivery,
        clock,
    }
}

fn harness() -> Harness {
    harness_with(OtpLifecycleConfig::default())
}

fn customer(email: &str) -> Customer {
    Customer::new(
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
    )
}

async fn stored_otp(h: &Harness, email: &str) -> Option<String> {
    h.repository
        .find_by_email(email)
        .await
        .unwrap()
        .and_then(|c| c.otp)
}

#[tokio::test]
async fn test_issue_persists_and_delivers_code() {
    let h = harness();
    let issued = h.service.issue(customer("a@example.com")).await.unwrap();

    let otp = issued.otp.clone().unwrap();
    assert_eq!(otp.len(), 6);
    assert!(otp.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(issued.otp_issued_at, t0());
    assert!(!issued.is_verified);

    assert_eq!(stored_otp(&h, "a@example.com").await, Some(otp.clone()));
    let sent = h.delivery.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].code, otp);
    assert_eq!(sent[0].purpose, OtpPurpose::Registration);
}

#[tokio::test]
async fn test_issue_survives_delivery_failure() {
    let h = harness();
    h.delivery.set_failing(true);

    let issued = h.service.issue(customer("a@example.com")).await.unwrap();
    assert!(issued.otp.is_some());
    assert_eq!(h.delivery.sent_count(), 0);
    assert_eq!(h.repository.len().await, 1);
}

#[tokio::test]
async fn test_resend_inside_window_is_too_soon() {
    let h = harness();
    h.service.issue(customer("a@example.com")).await.unwrap();
    let original = stored_otp(&h, "a@example.com").await;

    h.clock.advance_seconds(1);
    let result = h.service.request_resend(Some("a@example.com")).await;

    match result {
        Err(DomainError::Otp(OtpError::TooSoon { retry_after_seconds })) => {
            assert_eq!(retry_after_seconds, 29)
        }
        other => panic!("expected TooSoon, got {:?}", other),
    }
    assert_eq!(stored_otp(&h, "a@example.com").await, original);
    assert_eq!(h.delivery.sent_count(), 1);
}

#[tokio::test]
async fn test_resend_one_second_before_window_is_too_soon() {
    let h = harness();
    h.service.issue(customer("a@example.com")).await.unwrap();

    h.clock.advance_seconds(29);
    let result = h.service.request_resend(Some("a@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::TooSoon { retry_after_seconds: 1 }))
    ));
}

#[tokio::test]
async fn test_resend_after_window_issues_new_code() {
    let h = harness();
    h.service.issue(customer("a@example.com")).await.unwrap();
    let original = stored_otp(&h, "a@example.com").await.unwrap();

    h.clock.advance_seconds(30);
    let result = h.service.request_resend(Some("a@example.com")).await.unwrap();

    let replacement = stored_otp(&h, "a@example.com").await.unwrap();
    assert_ne!(replacement, original);
    assert_eq!(result.issued_at, h.clock.now());
    assert_eq!(result.next_resend_at, h.clock.now() + chrono::Duration::seconds(30));

    let sent = h.delivery.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].code, replacement);
    assert_eq!(sent[1].purpose, OtpPurpose::Resend);

    // The window restarts from the new issuance
    h.clock.advance_seconds(5);
    assert!(matches!(
        h.service.request_resend(Some("a@example.com")).await,
        Err(DomainError::Otp(OtpError::TooSoon { .. }))
    ));
}

#[tokio::test]
async fn test_resend_unknown_email_is_not_found() {
    let h = harness();
    let result = h.service.request_resend(Some("nobody@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::CustomerNotFound))
    ));
}

#[tokio::test]
async fn test_resend_null_email_is_invalid_input() {
    let h = harness();
    h.service.issue(customer("a@example.com")).await.unwrap();

    for email in [None, Some(""), Some("   "), Some("not-an-email")] {
        let result = h.service.request_resend(email).await;
        assert!(
            matches!(result, Err(DomainError::Otp(OtpError::InvalidInput { .. }))),
            "email {:?} gave {:?}",
            email,
            result
        );
    }
}

#[tokio::test]
async fn test_resend_normalizes_email() {
    let h = harness();
    h.service.issue(customer("a@example.com")).await.unwrap();
    h.clock.advance_seconds(31);

    assert!(h.service.request_resend(Some("  A@Example.com ")).await.is_ok());
}

#[tokio::test]
async fn test_verify_correct_code() {
    let h = harness();
    let issued = h.service.issue(customer("a@example.com")).await.unwrap();
    let otp = issued.otp.unwrap();

    let outcome = h.service.verify("a@example.com", &otp).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Verified);

    let stored = h.repository.find_by_email("a@example.com").await.unwrap().unwrap();
    assert!(stored.is_verified);
    assert!(stored.otp.is_none());
    assert_eq!(stored.verified_at, Some(t0()));
}

#[tokio::test]
async fn test_verify_wrong_code_leaves_customer_unverified() {
    let h = harness();
    let issued = h.service.issue(customer("a@example.com")).await.unwrap();
    let otp = issued.otp.unwrap();
    let wrong = if otp == "000000" { "111111" } else { "000000" };

    let result = h.service.verify("a@example.com", wrong).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::InvalidOtp))));

    let stored = h.repository.find_by_email("a@example.com").await.unwrap().unwrap();
    assert!(!stored.is_verified);
    assert_eq!(stored.otp, Some(otp));
}

#[tokio::test]
async fn test_verify_unknown_email_is_not_found() {
    let h = harness();
    let result = h.service.verify("nobody@example.com", "123456").await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::CustomerNotFound))
    ));
}

#[tokio::test]
async fn test_old_code_rejected_after_resend() {
    let h = harness();
    let issued = h.service.issue(customer("a@example.com")).await.unwrap();
    let old = issued.otp.unwrap();

    h.clock.advance_seconds(31);
    h.service.request_resend(Some("a@example.com")).await.unwrap();

    let result = h.service.verify("a@example.com", &old).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::InvalidOtp))));

    let new = h.delivery.last_code_for("a@example.com").unwrap();
    assert_eq!(
        h.service.verify("a@example.com", &new).await.unwrap(),
        VerifyOutcome::Verified
    );
}

#[tokio::test]
async fn test_repeat_verify_is_noop_by_default() {
    let h = harness();
    let otp = h.service.issue(customer("a@example.com")).await.unwrap().otp.unwrap();

    assert_eq!(
        h.service.verify("a@example.com", &otp).await.unwrap(),
        VerifyOutcome::Verified
    );
    h.clock.advance_seconds(100);
    assert_eq!(
        h.service.verify("a@example.com", &otp).await.unwrap(),
        VerifyOutcome::AlreadyVerified
    );
    assert_eq!(
        h.service.verify("a@example.com", "999999").await.unwrap(),
        VerifyOutcome::AlreadyVerified
    );

    let stored = h.repository.find_by_email("a@example.com").await.unwrap().unwrap();
    assert!(stored.is_verified);
    assert_eq!(stored.verified_at, Some(t0()));
}

#[tokio::test]
async fn test_repeat_verify_rejected_when_configured() {
    let h = harness_with(OtpLifecycleConfig {
        verified_resubmission: VerifiedResubmission::Reject,
        ..OtpLifecycleConfig::default()
    });
    let otp = h.service.issue(customer("a@example.com")).await.unwrap().otp.unwrap();
    h.service.verify("a@example.com", &otp).await.unwrap();

    let result = h.service.verify("a@example.com", &otp).await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::AlreadyVerified))
    ));
    let stored = h.repository.find_by_email("a@example.com").await.unwrap().unwrap();
    assert!(stored.is_verified);
}

#[tokio::test]
async fn test_resend_after_verification_issues_code_and_stays_verified() {
    let h = harness();
    let otp = h.service.issue(customer("a@example.com")).await.unwrap().otp.unwrap();
    h.service.verify("a@example.com", &otp).await.unwrap();

    h.clock.advance_seconds(31);
    let result = h.service.request_resend(Some("a@example.com")).await.unwrap();
    assert_eq!(result.issued_at, h.clock.now());

    let stored = h.repository.find_by_email("a@example.com").await.unwrap().unwrap();
    assert!(stored.is_verified);
    assert_eq!(stored.verified_at, Some(t0()));
    let new_otp = stored.otp.clone().unwrap();
    assert_ne!(new_otp, otp);
    assert_eq!(h.delivery.last_code_for("a@example.com"), Some(new_otp));
    assert_eq!(
        h.service.state_of("a@example.com").await.unwrap(),
        OtpState::Verified
    );

    // The window still applies to verified customers
    let result = h.service.request_resend(Some("a@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::TooSoon { retry_after_seconds: 30 }))
    ));
}

#[tokio::test]
async fn test_state_machine() {
    let h = harness();
    h.service.issue(customer("a@example.com")).await.unwrap();
    assert_eq!(
        h.service.state_of("a@example.com").await.unwrap(),
        OtpState::UnverifiedFresh
    );

    h.clock.advance_seconds(30);
    assert_eq!(
        h.service.state_of("a@example.com").await.unwrap(),
        OtpState::UnverifiedEligible
    );

    h.service.request_resend(Some("a@example.com")).await.unwrap();
    assert_eq!(
        h.service.state_of("a@example.com").await.unwrap(),
        OtpState::UnverifiedFresh
    );

    let otp = h.delivery.last_code_for("a@example.com").unwrap();
    h.service.verify("a@example.com", &otp).await.unwrap();
    assert_eq!(
        h.service.state_of("a@example.com").await.unwrap(),
        OtpState::Verified
    );
}

#[tokio::test]
async fn test_concurrent_resends_issue_one_code() {
    let h = Arc::new(harness());
    h.service.issue(customer("a@example.com")).await.unwrap();
    h.clock.advance_seconds(31);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let h = h.clone();
        handles.push(tokio::spawn(async move {
            h.service.request_resend(Some("a@example.com")).await
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(DomainError::Otp(OtpError::TooSoon { .. })) => {}
            Err(other) => panic!("unexpected error {:?}", other),
        }
    }

    assert_eq!(accepted, 1);
    // Registration plus exactly one resend
    assert_eq!(h.delivery.sent_count(), 2);
}

#[tokio::test]
async fn test_repository_failure_propagates_as_internal() {
    let h = harness();
    h.service.issue(customer("a@example.com")).await.unwrap();
    h.repository.set_unavailable(true);

    let result = h.service.request_resend(Some("a@example.com")).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}
