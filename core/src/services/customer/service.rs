//! Customer service implementation

use std::sync::Arc;

use onboard_shared::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::customer::{Customer, NewCustomer};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::CustomerRepository;
use crate::services::clock::Clock;
use crate::services::otp::{OtpDelivery, OtpLifecycleService};
use crate::services::token::TokenService;

use super::config::CustomerServiceConfig;
use super::types::{LoginResult, RegisteredCustomer};

/// Registers customers and authenticates them
pub struct CustomerService<R: CustomerRepository, D: OtpDelivery, K: Clock> {
    repository: Arc<R>,
    otp_service: Arc<OtpLifecycleService<R, D, K>>,
    token_service: Arc<TokenService>,
    clock: Arc<K>,
    config: CustomerServiceConfig,
}

impl<R: CustomerRepository, D: OtpDelivery, K: Clock> CustomerService<R, D, K> {
    pub fn new(
        repository: Arc<R>,
        otp_service: Arc<OtpLifecycleService<R, D, K>>,
        token_service: Arc<TokenService>,
        clock: Arc<K>,
        config: CustomerServiceConfig,
    ) -> Self {
        Self {
            repository,
            otp_service,
            token_service,
            clock,
            config,
        }
    }

    /// Register a customer, issue their first OTP and hand back a token.
    ///
    /// # Errors
    /// * `DomainError::Validation` - a field is missing or malformed
    /// * `AuthError::EmailAlreadyRegistered` - the email is taken
    pub async fn register(&self, input: NewCustomer) -> DomainResult<RegisteredCustomer> {
        self.validate(&input)?;

        let email = normalize_email(&input.email);
        if self.repository.exists_by_email(&email).await? {
            tracing::info!(
                email = %mask_email(&email),
                event = "registration_duplicate",
                "Registration attempted with an existing email"
            );
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = hash_password(input.password.clone(), self.config.bcrypt_cost).await?;

        let customer = Customer::new(input, password_hash, self.clock.now());
        let customer = self.otp_service.issue(customer).await?;
        let token = self.token_service.issue_access_token(&customer)?;

        tracing::info!(
            customer_id = %customer.id,
            email = %mask_email(&customer.email),
            event = "customer_registered",
            "Customer registered"
        );

        Ok(RegisteredCustomer { customer, token })
    }

    /// Authenticate with email and password.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResult> {
        let email = normalize_email(email);
        let customer = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = verify_password(password.to_string(), customer.password_hash.clone()).await?;
        if !matches {
            tracing::warn!(
                customer_id = %customer.id,
                event = "login_failed",
                "Password mismatch"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if self.config.require_verified_login && !customer.is_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        let token = self.token_service.issue_access_token(&customer)?;
        tracing::info!(customer_id = %customer.id, event = "login_succeeded", "Customer logged in");

        Ok(LoginResult { customer, token })
    }

    fn validate(&self, input: &NewCustomer) -> DomainResult<()> {
        let required = [
            ("f_name", &input.first_name),
            ("l_name", &input.last_name),
            ("email", &input.email),
            ("password", &input.password),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(DomainError::Validation {
                message: format!("{} is required", field),
            });
        }
        if !is_valid_email(&input.email) {
            return Err(DomainError::Validation {
                message: "Invalid email address".to_string(),
            });
        }
        if input.password.chars().count() < self.config.min_password_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }
        Ok(())
    }
}

// bcrypt is CPU bound; keep it off the async workers.
async fn hash_password(password: String, cost: u32) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
}

async fn verify_password(password: String, hash: String) -> DomainResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("Password check task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("Failed to verify password: {}", e)))
}
