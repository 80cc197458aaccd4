//! Customer entity: the identity whose email address is verified by OTP.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input before the password is hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_no: String,
    pub address: String,
}

/// Where a customer sits in the email verification lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpState {
    /// OTP issued and the resend window has not elapsed
    UnverifiedFresh,
    /// OTP issued and a resend is allowed
    UnverifiedEligible,
    /// Email verified; terminal
    Verified,
}

/// Customer entity representing a registered customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier for the customer
    pub id: Uuid,

    pub first_name: String,
    pub last_name: String,

    /// Normalized (trimmed, lower-cased) email; unique
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub phone_no: String,
    pub address: String,

    /// Outstanding OTP, cleared once verified
    #[serde(skip_serializing, default)]
    pub otp: Option<String>,

    /// When the outstanding OTP was issued, truncated to whole seconds
    pub otp_issued_at: DateTime<Utc>,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// When the email address was verified
    pub verified_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Drop sub-second precision so stored and compared timestamps agree
pub fn truncate_to_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    at.with_nanosecond(0).unwrap_or(at)
}

impl Customer {
    /// Creates an unverified customer with no OTP assigned yet
    pub fn new(input: NewCustomer, password_hash: String, now: DateTime<Utc>) -> Self {
        let now = truncate_to_seconds(now);
        Self {
            id: Uuid::new_v4(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: onboard_shared::validation::normalize_email(&input.email),
            password_hash,
            phone_no: input.phone_no.trim().to_string(),
            address: input.address.trim().to_string(),
            otp: None,
            otp_issued_at: now,
            is_verified: false,
            verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the outstanding OTP and restarts the resend window
    pub fn assign_otp(&mut self, code: String, now: DateTime<Utc>) {
        let now = truncate_to_seconds(now);
        self.otp = Some(code);
        self.otp_issued_at = now;
        self.updated_at = now;
    }

    /// Marks the email as verified and consumes the OTP.
    ///
    /// Calling this on a verified customer changes nothing.
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        if self.is_verified {
            return;
        }
        let now = truncate_to_seconds(now);
        self.is_verified = true;
        self.otp = None;
        self.verified_at = Some(now);
        self.updated_at = now;
    }

    /// Whole seconds elapsed since the outstanding OTP was issued
    pub fn seconds_since_issue(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp() - self.otp_issued_at.timestamp()
    }

    /// Earliest moment a resend will be accepted
    pub fn next_resend_at(&self, min_interval_seconds: i64) -> DateTime<Utc> {
        self.otp_issued_at + Duration::seconds(min_interval_seconds)
    }

    /// Seconds left in the resend window, zero once it has elapsed
    pub fn retry_after_seconds(&self, now: DateTime<Utc>, min_interval_seconds: i64) -> i64 {
        (min_interval_seconds - self.seconds_since_issue(now)).max(0)
    }

    /// Current lifecycle state
    pub fn otp_state(&self, now: DateTime<Utc>, min_interval_seconds: i64) -> OtpState {
        if self.is_verified {
            OtpState::Verified
        } else if self.seconds_since_issue(now) >= min_interval_seconds {
            OtpState::UnverifiedEligible
        } else {
            OtpState::UnverifiedFresh
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
