//! Customer Service
//!
//! Registers customers and looks them up by id.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use async_trait::async_trait;

use crate::application::dto::CustomerDto;
use crate::domain::{Customer, CustomerRepository};
use crate::shared::error::AppError;

/// Customer service trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Register a new customer
    async fn save(&self, request: CustomerDto) -> Result<Customer, CustomerError>;

    /// Get customer by ID
    async fn find_by_id(&self, id: i64) -> Result<Customer, CustomerError>;
}

/// Customer service errors
#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("Customer {0} not found")]
    NotFound(i64),

    #[error("CPF or email already registered")]
    AlreadyRegistered,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// CustomerService implementation
pub struct CustomerServiceImpl<U>
where
    U: CustomerRepository,
{
    customer_repo: Arc<U>,
}

impl<U> CustomerServiceImpl<U>
where
    U: CustomerRepository,
{
    pub fn new(customer_repo: Arc<U>) -> Self {
        Self { customer_repo }
    }

    /// Hash a password using Argon2id
    fn hash_password(password: &str) -> Result<String, CustomerError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CustomerError::Internal(format!("Password hashing failed: {}", e)))
    }
}

#[async_trait]
impl<U> CustomerService for CustomerServiceImpl<U>
where
    U: CustomerRepository + 'static,
{
    async fn save(&self, request: CustomerDto) -> Result<Customer, CustomerError> {
        let password_hash = Self::hash_password(&request.password)?;
        let customer = request.to_entity(password_hash);

        let saved = self
            .customer_repo
            .create(&customer)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => CustomerError::AlreadyRegistered,
                e => CustomerError::Internal(e.to_string()),
            })?;

        tracing::info!(customer_id = saved.id, "Customer registered");

        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Customer, CustomerError> {
        self.customer_repo
            .find_by_id(id)
            .await
            .map_err(|e| CustomerError::Internal(e.to_string()))?
            .ok_or(CustomerError::NotFound(id))
    }
}
