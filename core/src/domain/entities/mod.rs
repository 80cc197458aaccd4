//! Domain entities representing core business objects.

pub mod customer;
pub mod document;
pub mod otp;
pub mod token;


// Re-export commonly used types
pub use customer::{Customer, NewCustomer, OtpState};
pub use document::{Document, DocumentKind, VerificationStatus};
pub use otp::{CODE_LENGTH, DEFAULT_RESEND_INTERVAL_SECONDS};
pub use token::{Claims, ACCESS_TOKEN_EXPIRY_SECONDS, JWT_AUDIENCE, JWT_ISSUER};
