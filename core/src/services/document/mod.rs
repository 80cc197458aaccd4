//! Identity document uploads
//!
//! Accepts a customer's document, checks that its contents match the
//! format it claims, stores the bytes through a [`BlobStore`] and records
//! the metadata with the check's outcome.

mod config;
mod mock;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::DocumentServiceConfig;
pub use mock::MockBlobStore;
pub use service::DocumentService;
pub use traits::BlobStore;
pub use types::UploadedFile;
