//! Authentication route handlers
//!
//! - Registration and login
//! - Email verification with the OTP sent at registration
//! - Throttled OTP resend

pub mod login;
pub mod register;
pub mod resend_otp;
pub mod verify_email;

use std::sync::Arc;

use onboard_core::repositories::CustomerRepository;
use onboard_core::services::{Clock, CustomerService, OtpDelivery, OtpLifecycleService};

/// Application state that holds shared services
pub struct AppState<R, D, K>
where
    R: CustomerRepository,
    D: OtpDelivery,
    K: Clock,
{
    pub customer_service: Arc<CustomerService<R, D, K>>,
    pub otp_service: Arc<OtpLifecycleService<R, D, K>>,
}

impl<R, D, K> AppState<R, D, K>
where
    R: CustomerRepository,
    D: OtpDelivery,
    K: Clock,
{
    pub fn new(
        customer_service: Arc<CustomerService<R, D, K>>,
        otp_service: Arc<OtpLifecycleService<R, D, K>>,
    ) -> Self {
        Self {
            customer_service,
            otp_service,
        }
    }
}
