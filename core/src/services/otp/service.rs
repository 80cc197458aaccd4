//! OTP lifecycle service implementation

use std::sync::Arc;

use onboard_shared::config::VerifiedResubmission;
use onboard_shared::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::customer::{truncate_to_seconds, Customer, OtpState};
use crate::domain::entities::otp::{codes_match, generate_code, generate_distinct_code};
use crate::errors::{DomainResult, OtpError};
use crate::repositories::CustomerRepository;
use crate::services::clock::Clock;

use super::config::OtpLifecycleConfig;
use super::traits::{OtpDelivery, OtpPurpose};
use super::types::{ResendResult, VerifyOutcome};

/// Issues, throttles and verifies email OTPs
pub struct OtpLifecycleService<R: CustomerRepository, D: OtpDelivery, K: Clock> {
    /// Customer persistence
    repository: Arc<R>,
    /// Outbound delivery of codes
    delivery: Arc<D>,
    /// Time source for issuance and throttling
    clock: Arc<K>,
    /// Service configuration
    config: OtpLifecycleConfig,
}

impl<R: CustomerRepository, D: OtpDelivery, K: Clock> OtpLifecycleService<R, D, K> {
    /// Create a new OTP lifecycle service
    pub fn new(repository: Arc<R>, delivery: Arc<D>, clock: Arc<K>, config: OtpLifecycleConfig) -> Self {
        Self {
            repository,
            delivery,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &OtpLifecycleConfig {
        &self.config
    }

    /// Assign the first OTP to a new customer, persist it and send the code.
    ///
    /// The customer row is created here, so the code and its issuance time
    /// are stored in the same write as the identity. A delivery failure is
    /// logged and does not fail registration; the customer can ask for a
    /// resend once the window elapses.
    pub async fn issue(&self, mut customer: Customer) -> DomainResult<Customer> {
        let code = generate_code(self.config.code_length);
        customer.assign_otp(code.clone(), self.clock.now());

        let customer = self.repository.create(customer).await?;

        tracing::info!(
            customer_id = %customer.id,
            email = %mask_email(&customer.email),
            event = "otp_issued",
            "Issued registration OTP"
        );

        self.dispatch(&customer, &code, OtpPurpose::Registration).await;
        Ok(customer)
    }

    /// Check a submitted code and mark the customer verified on a match.
    ///
    /// # Errors
    /// * `OtpError::InvalidInput` - email missing or malformed
    /// * `OtpError::CustomerNotFound` - no customer with this email
    /// * `OtpError::InvalidOtp` - the code does not match the outstanding one
    /// * `OtpError::AlreadyVerified` - already verified and the policy rejects resubmission
    pub async fn verify(&self, email: &str, otp: &str) -> DomainResult<VerifyOutcome> {
        let email = Self::checked_email(Some(email))?;
        let customer = self.find_customer(&email).await?;

        if customer.is_verified {
            return self.already_verified(&customer);
        }

        let stored = match customer.otp.as_deref() {
            Some(stored) if codes_match(stored, otp) => stored,
            _ => {
                tracing::warn!(
                    customer_id = %customer.id,
                    event = "otp_verification_failed",
                    "Submitted OTP does not match"
                );
                return Err(OtpError::InvalidOtp.into());
            }
        };

        let now = self.clock.now();
        if self.repository.mark_verified(customer.id, stored, now).await? {
            tracing::info!(
                customer_id = %customer.id,
                email = %mask_email(&customer.email),
                event = "email_verified",
                "Customer email verified"
            );
            return Ok(VerifyOutcome::Verified);
        }

        // The row changed between the read and the write: either a concurrent
        // verify won, or a resend replaced the code we matched against.
        let current = self.find_customer(&email).await?;
        if current.is_verified {
            self.already_verified(&current)
        } else {
            Err(OtpError::InvalidOtp.into())
        }
    }

    /// Replace the outstanding OTP if the resend window has elapsed.
    ///
    /// # Errors
    /// * `OtpError::InvalidInput` - email missing or malformed
    /// * `OtpError::CustomerNotFound` - no customer with this email
    /// * `OtpError::TooSoon` - inside the window, or another resend won the race
    pub async fn request_resend(&self, email: Option<&str>) -> DomainResult<ResendResult> {
        let email = Self::checked_email(email)?;
        let customer = self.find_customer(&email).await?;

        let interval = self.config.resend_interval_seconds;
        let now = self.clock.now();
        if customer.seconds_since_issue(now) < interval {
            let retry_after_seconds = customer.retry_after_seconds(now, interval);
            tracing::warn!(
                customer_id = %customer.id,
                retry_after_seconds = retry_after_seconds,
                event = "otp_resend_throttled",
                "OTP resend requested inside the resend window"
            );
            return Err(OtpError::TooSoon {
                retry_after_seconds,
            }
            .into());
        }

        let code = generate_distinct_code(self.config.code_length, customer.otp.as_deref());
        let issued_at = truncate_to_seconds(now);

        let rotated = self
            .repository
            .rotate_otp(customer.id, customer.otp_issued_at, &code, issued_at)
            .await?;

        if !rotated {
            let current = self.find_customer(&email).await?;
            tracing::warn!(
                customer_id = %customer.id,
                event = "otp_resend_conflict",
                "Concurrent resend already replaced the OTP"
            );
            return Err(OtpError::TooSoon {
                retry_after_seconds: current.retry_after_seconds(now, interval).max(1),
            }
            .into());
        }

        tracing::info!(
            customer_id = %customer.id,
            email = %mask_email(&customer.email),
            event = "otp_resent",
            "Issued replacement OTP"
        );

        self.dispatch(&customer, &code, OtpPurpose::Resend).await;

        Ok(ResendResult {
            customer_id: customer.id,
            issued_at,
            next_resend_at: issued_at + chrono::Duration::seconds(interval),
        })
    }

    /// Current lifecycle state of a customer's OTP
    pub async fn state_of(&self, email: &str) -> DomainResult<OtpState> {
        let email = Self::checked_email(Some(email))?;
        let customer = self.find_customer(&email).await?;
        Ok(customer.otp_state(self.clock.now(), self.config.resend_interval_seconds))
    }

    fn already_verified(&self, customer: &Customer) -> DomainResult<VerifyOutcome> {
        tracing::info!(
            customer_id = %customer.id,
            event = "otp_verified_resubmission",
            "Verification submitted for an already verified customer"
        );
        match self.config.verified_resubmission {
            VerifiedResubmission::NoOp => Ok(VerifyOutcome::AlreadyVerified),
            VerifiedResubmission::Reject => Err(OtpError::AlreadyVerified.into()),
        }
    }

    async fn find_customer(&self, email: &str) -> DomainResult<Customer> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| OtpError::CustomerNotFound.into())
    }

    async fn dispatch(&self, customer: &Customer, code: &str, purpose: OtpPurpose) {
        match self.delivery.send_otp(&customer.email, code, purpose).await {
            Ok(message_id) => tracing::debug!(
                customer_id = %customer.id,
                message_id = %message_id,
                purpose = %purpose,
                "OTP delivered"
            ),
            Err(e) => tracing::warn!(
                customer_id = %customer.id,
                purpose = %purpose,
                error = %e,
                event = "otp_delivery_failed",
                "Failed to deliver OTP"
            ),
        }
    }

    fn checked_email(email: Option<&str>) -> Result<String, OtpError> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| OtpError::InvalidInput {
                reason: "email is required".to_string(),
            })?;
        if !is_valid_email(email) {
            return Err(OtpError::InvalidInput {
                reason: "email is malformed".to_string(),
            });
        }
        Ok(normalize_email(email))
    }
}
