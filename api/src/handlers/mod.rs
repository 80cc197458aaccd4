pub mod error;

pub use error::{handle_domain_error, server_error, validation_error, Operation};
