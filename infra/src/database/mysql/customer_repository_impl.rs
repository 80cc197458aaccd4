//! MySQL implementation of the CustomerRepository trait.
//!
//! The conditional writes are single `UPDATE ... WHERE` statements so MySQL
//! evaluates the guard and applies the change under one row lock;
//! `rows_affected() == 1` reports whether this caller won.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use onboard_core::domain::entities::customer::{truncate_to_seconds, Customer};
use onboard_core::errors::{AuthError, DomainError};
use onboard_core::repositories::CustomerRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, first_name, last_name, email, password_hash, phone_no, address,
           otp, otp_issued_at, is_verified, verified_at, created_at, updated_at
    FROM customers
"#;

/// MySQL implementation of CustomerRepository
pub struct MySqlCustomerRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCustomerRepository {
    /// Create a new MySQL customer repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Customer entity
    fn row_to_customer(row: &sqlx::mysql::MySqlRow) -> Result<Customer, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;

        Ok(Customer {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid customer UUID: {}", e)))?,
            first_name: Self::column(row, "first_name")?,
            last_name: Self::column(row, "last_name")?,
            email: Self::column(row, "email")?,
            password_hash: Self::column(row, "password_hash")?,
            phone_no: Self::column(row, "phone_no")?,
            address: Self::column(row, "address")?,
            otp: Self::column(row, "otp")?,
            otp_issued_at: Self::column(row, "otp_issued_at")?,
            is_verified: Self::column(row, "is_verified")?,
            verified_at: Self::column(row, "verified_at")?,
            created_at: Self::column(row, "created_at")?,
            updated_at: Self::column(row, "updated_at")?,
        })
    }

    fn column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        row.try_get(name)
            .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        value: String,
    ) -> Result<Option<Customer>, DomainError> {
        let query = format!("{} WHERE {} LIMIT 1", SELECT_COLUMNS, clause);
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find customer: {}", e)))?;

        row.as_ref().map(Self::row_to_customer).transpose()
    }
}

#[async_trait]
impl CustomerRepository for MySqlCustomerRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        self.fetch_one_where("email = ?", email.to_string()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        self.fetch_one_where("id = ?", id.to_string()).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM customers WHERE email = ?) AS found")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to check email existence: {}", e)))?;

        let found: i64 = row
            .try_get("found")
            .map_err(|e| DomainError::internal(format!("Failed to get existence result: {}", e)))?;
        Ok(found == 1)
    }

    async fn create(&self, customer: Customer) -> Result<Customer, DomainError> {
        let query = r#"
            INSERT INTO customers (
                id, first_name, last_name, email, password_hash, phone_no, address,
                otp, otp_issued_at, is_verified, verified_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(customer.id.to_string())
            .bind(&customer.first_name)
            .bind(&customer.last_name)
            .bind(&customer.email)
            .bind(&customer.password_hash)
            .bind(&customer.phone_no)
            .bind(&customer.address)
            .bind(&customer.otp)
            .bind(customer.otp_issued_at)
            .bind(customer.is_verified)
            .bind(customer.verified_at)
            .bind(customer.created_at)
            .bind(customer.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::EmailAlreadyRegistered)
                }
                _ => DomainError::internal(format!("Failed to create customer: {}", e)),
            })?;

        Ok(customer)
    }

    async fn rotate_otp(
        &self,
        id: Uuid,
        expected_issued_at: DateTime<Utc>,
        otp: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let issued_at = truncate_to_seconds(issued_at);
        let query = r#"
            UPDATE customers
            SET otp = ?, otp_issued_at = ?, updated_at = ?
            WHERE id = ? AND otp_issued_at = ?
        "#;

        let result = sqlx::query(query)
            .bind(otp)
            .bind(issued_at)
            .bind(issued_at)
            .bind(id.to_string())
            .bind(expected_issued_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to rotate OTP: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn mark_verified(
        &self,
        id: Uuid,
        expected_otp: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let verified_at = truncate_to_seconds(verified_at);
        let query = r#"
            UPDATE customers
            SET is_verified = TRUE, otp = NULL, verified_at = ?, updated_at = ?
            WHERE id = ? AND is_verified = FALSE AND otp = ?
        "#;

        let result = sqlx::query(query)
            .bind(verified_at)
            .bind(verified_at)
            .bind(id.to_string())
            .bind(expected_otp)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to mark customer verified: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }
}
