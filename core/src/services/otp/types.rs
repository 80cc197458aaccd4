//! Types for OTP lifecycle results

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of a successful verify call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// This call flipped the customer to verified
    Verified,
    /// The customer was verified before this call; nothing changed
    AlreadyVerified,
}

/// Result of an accepted resend request. The new code is never included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendResult {
    pub customer_id: Uuid,
    /// When the new code was issued
    pub issued_at: DateTime<Utc>,
    /// When the customer can request another code
    pub next_resend_at: DateTime<Utc>,
}
