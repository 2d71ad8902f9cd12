//! Customer entity and repository trait.
//!
//! Maps to the `customers` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Postal address embedded in the customer row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub zip_code: String,
    pub street: String,
}

/// A customer that can apply for credit.
///
/// Maps to the `customers` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - first_name: VARCHAR(100) NOT NULL
/// - last_name: VARCHAR(100) NOT NULL
/// - cpf: VARCHAR(11) NOT NULL UNIQUE
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - password_hash: VARCHAR(255) NOT NULL
/// - zip_code: VARCHAR(20) NOT NULL
/// - street: VARCHAR(255) NOT NULL
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Customer {
    /// Database identifier, `0` until persisted
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    /// Brazilian tax id, 11 digits
    pub cpf: String,

    pub email: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub address: Address,
}

impl Customer {
    /// Build a lightweight reference that only carries the identifier.
    ///
    /// Used when a credit request names its owner; the remaining fields are
    /// filled in once the customer is loaded from storage.
    pub fn reference(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// Repository trait for Customer data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;

    /// Persist a new customer, returning it with its assigned id.
    ///
    /// Fails with `AppError::Conflict` when the cpf or email is already taken.
    async fn create(&self, customer: &Customer) -> Result<Customer, AppError>;
}
