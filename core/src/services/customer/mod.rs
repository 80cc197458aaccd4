//! Customer registration and login

mod config;
mod service;
mod types;


pub use config::CustomerServiceConfig;
pub use service::CustomerService;
pub use types::{LoginResult, RegisteredCustomer};
