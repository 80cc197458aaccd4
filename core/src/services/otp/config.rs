//! Configuration for the OTP lifecycle service

use onboard_shared::config::{OtpConfig, VerifiedResubmission};

use crate::domain::entities::otp::{CODE_LENGTH, DEFAULT_RESEND_INTERVAL_SECONDS};

/// Configuration for the OTP lifecycle service
#[derive(Debug, Clone)]
pub struct OtpLifecycleConfig {
    /// Minimum seconds between two issuances for the same customer
    pub resend_interval_seconds: i64,
    /// Number of digits in a code
    pub code_length: usize,
    /// Policy for verify calls on an already verified customer
    pub verified_resubmission: VerifiedResubmission,
}

impl Default for OtpLifecycleConfig {
    fn default() -> Self {
        Self {
            resend_interval_seconds: DEFAULT_RESEND_INTERVAL_SECONDS,
            code_length: CODE_LENGTH,
            verified_resubmission: VerifiedResubmission::NoOp,
        }
    }
}

impl From<&OtpConfig> for OtpLifecycleConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            resend_interval_seconds: config.resend_interval_seconds,
            code_length: config.code_length,
            verified_resubmission: config.verified_resubmission,
        }
    }
}
