//! Types for customer service results

use crate::domain::entities::customer::Customer;

/// A freshly registered customer and their bearer token
#[derive(Debug, Clone)]
pub struct RegisteredCustomer {
    pub customer: Customer,
    pub token: String,
}

/// A successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub customer: Customer,
    pub token: String,
}
