//! In-memory implementation of CustomerRepository for tests and local runs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::customer::Customer;
use crate::errors::{AuthError, DomainError};

use super::trait_::CustomerRepository;

/// Mock customer repository backed by a `HashMap`
#[derive(Clone, Default)]
pub struct MockCustomerRepository {
    customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockCustomerRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored customers
    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }

    /// Overwrite a stored customer, bypassing every check
    pub async fn put(&self, customer: Customer) {
        self.customers.write().await.insert(customer.id, customer);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock repository unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for MockCustomerRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        self.check_available()?;
        let customers = self.customers.read().await;
        Ok(customers.values().find(|c| c.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        self.check_available()?;
        let customers = self.customers.read().await;
        Ok(customers.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let customers = self.customers.read().await;
        Ok(customers.values().any(|c| c.email == email))
    }

    async fn create(&self, customer: Customer) -> Result<Customer, DomainError> {
        self.check_available()?;
        let mut customers = self.customers.write().await;

        if customers.values().any(|c| c.email == customer.email) {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn rotate_otp(
        &self,
        id: Uuid,
        expected_issued_at: DateTime<Utc>,
        otp: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut customers = self.customers.write().await;

        match customers.get_mut(&id) {
            Some(c) if c.otp_issued_at == expected_issued_at => {
                c.assign_otp(otp.to_string(), issued_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_verified(
        &self,
        id: Uuid,
        expected_otp: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut customers = self.customers.write().await;

        match customers.get_mut(&id) {
            Some(c) if !c.is_verified && c.otp.as_deref() == Some(expected_otp) => {
                c.mark_verified(verified_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
