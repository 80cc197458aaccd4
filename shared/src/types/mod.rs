//! Type definitions shared by the HTTP layer
//!
//! - `response` - Message envelopes, error bodies and health checks

pub mod response;

pub use response::{ErrorResponse, HealthResponse, HealthStatus, MessageResponse, ServiceHealth};
