//! In-memory OTP delivery that records every message

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::traits::{OtpDelivery, OtpPurpose};

/// A recorded delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentOtp {
    pub email: String,
    pub code: String,
    pub purpose: OtpPurpose,
}

/// Delivery double for tests and local development
#[derive(Debug, Clone, Default)]
pub struct MockOtpDelivery {
    sent: Arc<Mutex<Vec<SentOtp>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockOtpDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// A delivery that rejects every message
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.set_failing(true);
        mock
    }

    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    /// Every message recorded so far, oldest first
    pub fn sent(&self) -> Vec<SentOtp> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Most recent code sent to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .rev()
            .find(|m| m.email == email)
            .map(|m| m.code.clone())
    }
}

#[async_trait]
impl OtpDelivery for MockOtpDelivery {
    async fn send_otp(&self, email: &str, code: &str, purpose: OtpPurpose) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("OTP delivery failed".to_string());
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentOtp {
                email: email.to_string(),
                code: code.to_string(),
                purpose,
            });
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}
