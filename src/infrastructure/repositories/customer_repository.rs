//! Customer Repository Implementation
//!
//! PostgreSQL implementation of the CustomerRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Address, Customer, CustomerRepository};
use crate::shared::error::AppError;

/// Database row representation of the customers table.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CustomerRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub password_hash: String,
    pub zip_code: String,
    pub street: String,
}

impl CustomerRow {
    /// Convert database row to domain Customer entity.
    pub fn into_customer(self) -> Customer {
        Customer {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            cpf: self.cpf,
            email: self.email,
            password_hash: self.password_hash,
            address: Address {
                zip_code: self.zip_code,
                street: self.street,
            },
        }
    }
}

/// PostgreSQL customer repository implementation.
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    /// Create a new PgCustomerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, cpf, email, password_hash, zip_code, street
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CustomerRow::into_customer))
    }

    async fn create(&self, customer: &Customer) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (first_name, last_name, cpf, email, password_hash, zip_code, street)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, first_name, last_name, cpf, email, password_hash, zip_code, street
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.cpf)
        .bind(&customer.email)
        .bind(&customer.password_hash)
        .bind(&customer.address.zip_code)
        .bind(&customer.address.street)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Customer with this CPF or email already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_customer())
    }
}
