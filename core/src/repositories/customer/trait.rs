//! Customer repository trait defining the interface for customer persistence.
//!
//! The two conditional writes, [`CustomerRepository::rotate_otp`] and
//! [`CustomerRepository::mark_verified`], carry the value the caller read so
//! that a read-check-write sequence commits only if nothing changed in
//! between. Implementations must evaluate the condition and the write as one
//! atomic step (a single `UPDATE ... WHERE`, or one held lock).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::customer::Customer;
use crate::errors::DomainError;

/// Repository trait for Customer entity persistence operations
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by normalized email
    ///
    /// # Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - No customer with that email
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;

    /// Find a customer by unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;

    /// Check whether an email is already registered
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Insert a new customer
    ///
    /// # Errors
    /// * `AuthError::EmailAlreadyRegistered` - the email is taken
    async fn create(&self, customer: Customer) -> Result<Customer, DomainError>;

    /// Replace the outstanding OTP if the stored issuance time still equals
    /// `expected_issued_at`. The verification flag is left untouched.
    ///
    /// # Returns
    /// * `Ok(true)` - the new OTP was stored
    /// * `Ok(false)` - the condition no longer held (or the customer is gone)
    async fn rotate_otp(
        &self,
        id: Uuid,
        expected_issued_at: DateTime<Utc>,
        otp: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Flip the verification flag and clear the OTP if the customer is still
    /// unverified and still holds `expected_otp`.
    ///
    /// # Returns
    /// * `Ok(true)` - the customer is now verified by this call
    /// * `Ok(false)` - the condition no longer held
    async fn mark_verified(
        &self,
        id: Uuid,
        expected_otp: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}
