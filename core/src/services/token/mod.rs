//! Token service module for JWT management
//!
//! Issues and verifies the HS256 bearer tokens handed out at registration
//! and login.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
