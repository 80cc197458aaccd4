//! Repository interfaces and in-memory implementations.

pub mod customer;
pub mod document;

pub use customer::{CustomerRepository, MockCustomerRepository};
pub use document::{DocumentRepository, MockDocumentRepository};
