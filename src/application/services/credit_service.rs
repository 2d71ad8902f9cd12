//! Credit Service
//!
//! Stores credit applications and answers the two credit queries:
//! all credits of a customer, and a single credit by code.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Credit, CreditRepository, CustomerRepository};
use crate::shared::error::AppError;

/// Credit service trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreditService: Send + Sync {
    /// Persist a credit for an existing customer
    async fn save(&self, credit: Credit) -> Result<Credit, CreditError>;

    /// List every credit owned by a customer
    async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>, CreditError>;

    /// Fetch one credit, only if `customer_id` owns it
    async fn find_by_credit_code(
        &self,
        customer_id: i64,
        credit_code: Uuid,
    ) -> Result<Credit, CreditError>;
}

/// Credit service errors
#[derive(Debug, thiserror::Error)]
pub enum CreditError {
    #[error("Customer {0} not found")]
    CustomerNotFound(i64),

    /// Unknown code, or a code owned by another customer.
    #[error("Credit code {0} not found")]
    CreditNotFound(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// CreditService implementation
pub struct CreditServiceImpl<C, U>
where
    C: CreditRepository,
    U: CustomerRepository,
{
    credit_repo: Arc<C>,
    customer_repo: Arc<U>,
}

impl<C, U> CreditServiceImpl<C, U>
where
    C: CreditRepository,
    U: CustomerRepository,
{
    pub fn new(credit_repo: Arc<C>, customer_repo: Arc<U>) -> Self {
        Self {
            credit_repo,
            customer_repo,
        }
    }
}

#[async_trait]
impl<C, U> CreditService for CreditServiceImpl<C, U>
where
    C: CreditRepository + 'static,
    U: CustomerRepository + 'static,
{
    async fn save(&self, mut credit: Credit) -> Result<Credit, CreditError> {
        let customer_id = credit.customer_id();

        let customer = self
            .customer_repo
            .find_by_id(customer_id)
            .await
            .map_err(|e| CreditError::Internal(e.to_string()))?
            .ok_or(CreditError::CustomerNotFound(customer_id))?;

        credit.customer = customer;
        if credit.credit_code.is_nil() {
            credit.credit_code = Uuid::new_v4();
        }

        let saved = self
            .credit_repo
            .insert(&credit)
            .await
            .map_err(|e| match e {
                // The customer may disappear between lookup and insert
                AppError::NotFound(_) => CreditError::CustomerNotFound(customer_id),
                e => CreditError::Internal(e.to_string()),
            })?;

        tracing::info!(
            credit_code = %saved.credit_code,
            customer_id,
            "Credit saved"
        );

        Ok(saved)
    }

    async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>, CreditError> {
        self.credit_repo
            .find_by_customer_id(customer_id)
            .await
            .map_err(|e| CreditError::Internal(e.to_string()))
    }

    async fn find_by_credit_code(
        &self,
        customer_id: i64,
        credit_code: Uuid,
    ) -> Result<Credit, CreditError> {
        let credit = self
            .credit_repo
            .find_by_code_and_customer_id(credit_code, customer_id)
            .await
            .map_err(|e| CreditError::Internal(e.to_string()))?
            .ok_or(CreditError::CreditNotFound(credit_code))?;

        // Repositories filter by owner already; never hand out a foreign credit
        if !credit.is_owned_by(customer_id) {
            tracing::warn!(%credit_code, customer_id, "Credit lookup returned foreign credit");
            return Err(CreditError::CreditNotFound(credit_code));
        }

        Ok(credit)
    }
}
