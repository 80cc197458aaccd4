//! OTP lifecycle module
//!
//! Issues, throttles and verifies the email one-time passcodes bound to a
//! customer. Delivery is delegated to an [`OtpDelivery`] implementation.

mod config;
mod mock;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpLifecycleConfig;
pub use mock::{MockOtpDelivery, SentOtp};
pub use service::OtpLifecycleService;
pub use traits::{OtpDelivery, OtpPurpose};
pub use types::{ResendResult, VerifyOutcome};
