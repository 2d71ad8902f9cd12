//! Credit Repository Implementation
//!
//! PostgreSQL implementation of the CreditRepository trait.
//! Reads join the owning customer so views can expose its email.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::customer_repository::CustomerRow;
use crate::domain::{Credit, CreditRepository, Customer, Status};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

const SELECT_WITH_CUSTOMER: &str = r#"
    SELECT cr.id, cr.credit_code, cr.credit_value, cr.day_first_installment,
           cr.number_of_installments, cr.status,
           cu.id AS customer_id, cu.first_name, cu.last_name, cu.cpf, cu.email,
           cu.password_hash, cu.zip_code, cu.street
    FROM credits cr
    JOIN customers cu ON cu.id = cr.customer_id
"#;

/// Credit columns as returned by `INSERT ... RETURNING`.
#[derive(Debug, sqlx::FromRow)]
struct CreditRow {
    id: i64,
    credit_code: Uuid,
    credit_value: BigDecimal,
    day_first_installment: NaiveDate,
    number_of_installments: i32,
    status: String,
}

impl CreditRow {
    fn into_credit(self, customer: Customer) -> Result<Credit, AppError> {
        let status = Status::from_str(&self.status).ok_or_else(|| {
            AppError::Internal(format!(
                "Unknown status '{}' on credit {}",
                self.status, self.credit_code
            ))
        })?;

        Ok(Credit {
            id: self.id,
            credit_code: self.credit_code,
            credit_value: self.credit_value,
            day_first_installment: self.day_first_installment,
            number_of_installments: self.number_of_installments,
            status,
            customer,
        })
    }
}

/// Credit row joined with its customer.
#[derive(Debug, sqlx::FromRow)]
struct CreditWithCustomerRow {
    id: i64,
    credit_code: Uuid,
    credit_value: BigDecimal,
    day_first_installment: NaiveDate,
    number_of_installments: i32,
    status: String,
    customer_id: i64,
    first_name: String,
    last_name: String,
    cpf: String,
    email: String,
    password_hash: String,
    zip_code: String,
    street: String,
}

impl CreditWithCustomerRow {
    fn into_credit(self) -> Result<Credit, AppError> {
        let customer = CustomerRow {
            id: self.customer_id,
            first_name: self.first_name,
            last_name: self.last_name,
            cpf: self.cpf,
            email: self.email,
            password_hash: self.password_hash,
            zip_code: self.zip_code,
            street: self.street,
        }
        .into_customer();

        CreditRow {
            id: self.id,
            credit_code: self.credit_code,
            credit_value: self.credit_value,
            day_first_installment: self.day_first_installment,
            number_of_installments: self.number_of_installments,
            status: self.status,
        }
        .into_credit(customer)
    }
}

/// PostgreSQL credit repository implementation.
#[derive(Clone)]
pub struct PgCreditRepository {
    pool: PgPool,
}

impl PgCreditRepository {
    /// Create a new PgCreditRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditRepository for PgCreditRepository {
    async fn insert(&self, credit: &Credit) -> Result<Credit, AppError> {
        let start = std::time::Instant::now();

        let row = sqlx::query_as::<_, CreditRow>(
            r#"
            INSERT INTO credits (credit_code, credit_value, day_first_installment,
                                 number_of_installments, status, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, credit_code, credit_value, day_first_installment,
                      number_of_installments, status
            "#,
        )
        .bind(credit.credit_code)
        .bind(&credit.credit_value)
        .bind(credit.day_first_installment)
        .bind(credit.number_of_installments)
        .bind(credit.status.as_str())
        .bind(credit.customer_id())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound(format!("Customer {} not found", credit.customer_id()))
            }
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!("Credit code {} already exists", credit.credit_code))
            }
            _ => AppError::Database(e),
        })?;

        metrics::record_db_query("insert", "credits", start.elapsed().as_secs_f64());

        row.into_credit(credit.customer.clone())
    }

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        let start = std::time::Instant::now();

        let rows = sqlx::query_as::<_, CreditWithCustomerRow>(&format!(
            "{SELECT_WITH_CUSTOMER} WHERE cr.customer_id = $1 ORDER BY cr.id"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        metrics::record_db_query("select", "credits", start.elapsed().as_secs_f64());

        rows.into_iter().map(CreditWithCustomerRow::into_credit).collect()
    }

    async fn find_by_code_and_customer_id(
        &self,
        credit_code: Uuid,
        customer_id: i64,
    ) -> Result<Option<Credit>, AppError> {
        let start = std::time::Instant::now();

        let row = sqlx::query_as::<_, CreditWithCustomerRow>(&format!(
            "{SELECT_WITH_CUSTOMER} WHERE cr.credit_code = $1 AND cr.customer_id = $2"
        ))
        .bind(credit_code)
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        metrics::record_db_query("select", "credits", start.elapsed().as_secs_f64());

        row.map(CreditWithCustomerRow::into_credit).transpose()
    }
}
