//! Business services containing domain logic and use cases.

pub mod clock;
pub mod customer;
pub mod document;
pub mod otp;
pub mod token;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use customer::{CustomerService, CustomerServiceConfig, LoginResult, RegisteredCustomer};
pub use document::{BlobStore, DocumentService, DocumentServiceConfig, MockBlobStore, UploadedFile};
pub use otp::{
    MockOtpDelivery, OtpDelivery, OtpLifecycleConfig, OtpLifecycleService, OtpPurpose,
    ResendResult, SentOtp, VerifyOutcome,
};
pub use token::{TokenService, TokenServiceConfig};
