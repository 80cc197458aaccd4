//! Configuration for the customer service

/// Configuration for the customer service
#[derive(Debug, Clone)]
pub struct CustomerServiceConfig {
    /// bcrypt cost factor for password hashes
    pub bcrypt_cost: u32,
    /// Refuse logins until the email address is verified
    pub require_verified_login: bool,
    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for CustomerServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            require_verified_login: true,
            min_password_length: 6,
        }
    }
}
