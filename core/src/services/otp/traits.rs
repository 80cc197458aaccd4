//! Trait for OTP delivery integration

use async_trait::async_trait;
use std::fmt;

/// Why a code is being sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Registration,
    Resend,
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtpPurpose::Registration => write!(f, "registration"),
            OtpPurpose::Resend => write!(f, "resend"),
        }
    }
}

/// Trait for delivering a code to the customer's inbox
#[async_trait]
pub trait OtpDelivery: Send + Sync {
    /// Send `code` to `email`, returning the provider's message id
    async fn send_otp(&self, email: &str, code: &str, purpose: OtpPurpose) -> Result<String, String>;
}
