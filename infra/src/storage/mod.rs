//! Blob storage for uploaded documents

pub mod local;

pub use local::LocalBlobStore;
