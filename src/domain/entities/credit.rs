//! Credit entity and repository trait.
//!
//! Maps to the `credits` table in the database schema.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::customer::Customer;
use crate::shared::error::AppError;

/// Lowest accepted number of installments.
pub const MIN_INSTALLMENTS: i32 = 1;

/// Highest accepted number of installments.
pub const MAX_INSTALLMENTS: i32 = 48;

/// Decimal places stored for a credit value (`NUMERIC(15, 2)`).
pub const CREDIT_VALUE_SCALE: i64 = 2;

/// Digits allowed before the decimal point of a credit value.
pub const CREDIT_VALUE_INTEGER_DIGITS: u32 = 13;

/// Credit status enum matching database VARCHAR constraint.
///
/// Every credit starts `InProgress`. The remaining states are reserved for
/// the analysis workflow; no transition between them is exposed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    InProgress,
    Approved,
    Rejected,
}

impl Status {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "IN_PROGRESS" => Some(Self::InProgress),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A credit application owned by exactly one customer.
///
/// Maps to the `credits` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - credit_code: UUID NOT NULL UNIQUE
/// - credit_value: NUMERIC(15, 2) NOT NULL
/// - day_first_installment: DATE NOT NULL
/// - number_of_installments: INTEGER NOT NULL CHECK (1..48)
/// - status: VARCHAR(20) NOT NULL DEFAULT 'IN_PROGRESS'
/// - customer_id: BIGINT NOT NULL REFERENCES customers(id)
#[derive(Debug, Clone, PartialEq)]
pub struct Credit {
    /// Database identifier, `0` until persisted
    pub id: i64,

    /// Public identifier, assigned once and never changed
    pub credit_code: Uuid,

    pub credit_value: BigDecimal,

    pub day_first_installment: NaiveDate,

    pub number_of_installments: i32,

    pub status: Status,

    /// Owner; may be a bare reference (see [`Customer::reference`])
    pub customer: Customer,
}

impl Credit {
    /// Create a new in-progress credit with a fresh credit code.
    pub fn new(
        credit_value: BigDecimal,
        day_first_installment: NaiveDate,
        number_of_installments: i32,
        customer: Customer,
    ) -> Self {
        Self {
            id: 0,
            credit_code: Uuid::new_v4(),
            credit_value,
            day_first_installment,
            number_of_installments,
            status: Status::InProgress,
            customer,
        }
    }

    pub fn customer_id(&self) -> i64 {
        self.customer.id
    }

    pub fn is_owned_by(&self, customer_id: i64) -> bool {
        self.customer.id == customer_id
    }
}

/// Repository trait for Credit data access operations.
///
/// Implementations must make `insert` atomic: a failed insert leaves no row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreditRepository: Send + Sync {
    /// Insert a credit, returning the stored row with its customer attached.
    ///
    /// Fails with `AppError::NotFound` when the customer does not exist.
    async fn insert(&self, credit: &Credit) -> Result<Credit, AppError>;

    /// All credits of a customer, in insertion order.
    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>, AppError>;

    /// The credit with this code, only if it belongs to the given customer.
    async fn find_by_code_and_customer_id(
        &self,
        credit_code: Uuid,
        customer_id: i64,
    ) -> Result<Option<Credit>, AppError>;
}
