//! Mock Email Service Implementation
//!
//! Logs messages instead of sending them. The code itself is never logged.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use onboard_core::services::otp::{OtpDelivery, OtpPurpose};
use onboard_shared::validation::mask_email;

use super::EmailMessage;
use crate::InfrastructureError;

/// Mock email service for development and testing
#[derive(Clone)]
pub struct MockEmailService {
    from_address: String,
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// "Send" a message
    pub async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Email("Simulated email failure".to_string()));
        }

        let message_id = format!("mock-{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);

        info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            message_id = %message_id,
            "[MOCK EMAIL] message accepted"
        );

        Ok(message_id)
    }
}

#[async_trait]
impl OtpDelivery for MockEmailService {
    async fn send_otp(&self, email: &str, code: &str, purpose: OtpPurpose) -> Result<String, String> {
        let message = EmailMessage::otp(&self.from_address, email, code, purpose);
        self.send_email(&message).await.map_err(|e| e.to_string())
    }
}
