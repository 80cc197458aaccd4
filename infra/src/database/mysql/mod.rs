//! MySQL repository implementations

mod customer_repository_impl;
mod document_repository_impl;

pub use customer_repository_impl::MySqlCustomerRepository;
pub use document_repository_impl::MySqlDocumentRepository;
