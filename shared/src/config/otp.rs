//! One-time passcode configuration

use serde::{Deserialize, Serialize};

/// What happens when a verification is submitted for an already verified customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerifiedResubmission {
    /// Report success without touching the record
    #[default]
    NoOp,
    /// Reject with a conflict
    Reject,
}

/// OTP issuance and resend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Minimum seconds between two issuances for the same customer
    pub resend_interval_seconds: i64,

    /// Number of decimal digits in a code
    pub code_length: usize,

    /// Policy for verification attempts on verified customers
    pub verified_resubmission: VerifiedResubmission,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            resend_interval_seconds: 30,
            code_length: 6,
            verified_resubmission: VerifiedResubmission::NoOp,
        }
    }
}
