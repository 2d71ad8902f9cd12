//! Response DTOs
//!
//! Read-only projections of domain entities. Each view lists exactly the
//! fields it exposes.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Credit, Customer, Status};

/// Full view of a single credit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditView {
    pub credit_code: Uuid,
    pub credit_value: BigDecimal,
    pub number_of_installments: i32,
    pub status: Status,
    pub day_first_installment: NaiveDate,
    pub email_customer: String,
}

impl From<Credit> for CreditView {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
            day_first_installment: credit.day_first_installment,
            email_customer: credit.customer.email,
        }
    }
}

/// Abbreviated view used in credit listings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditViewList {
    pub credit_code: Uuid,
    pub credit_value: BigDecimal,
    pub number_of_installments: i32,
    pub status: Status,
}

impl From<Credit> for CreditViewList {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
        }
    }
}

/// Customer profile view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub zip_code: String,
    pub street: String,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf,
            email: customer.email,
            zip_code: customer.address.zip_code,
            street: customer.address.street,
        }
    }
}

/// Confirmation text returned after a credit is stored
pub fn credit_saved_message(credit: &Credit) -> String {
    format!(
        "Credit {} - Customer {} saved!",
        credit.credit_code, credit.customer.email
    )
}

/// Confirmation text returned after a customer is registered
pub fn customer_saved_message(customer: &Customer) -> String {
    format!("Customer {} saved!", customer.email)
}
