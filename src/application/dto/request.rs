//! Request DTOs
//!
//! Data structures for API request bodies.

use std::borrow::Cow;

use bigdecimal::{BigDecimal, Zero};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{
    Address, Credit, Customer, CREDIT_VALUE_INTEGER_DIGITS, CREDIT_VALUE_SCALE, MAX_INSTALLMENTS,
    MIN_INSTALLMENTS,
};

/// Credit application request
///
/// Validated against [`CREDIT_RULES`]; see [`CreditDto::validate_on`].
/// JSON numbers in `creditValue` are read from their literal text, so
/// `1000.1` arrives as exactly `1000.1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditDto {
    pub credit_value: Option<BigDecimal>,
    pub day_first_of_installment: NaiveDate,
    pub number_of_installments: i32,
    pub customer_id: Option<i64>,
}

/// A single field constraint on a credit request.
pub struct CreditRule {
    pub field: &'static str,
    pub code: &'static str,
    pub message: &'static str,
    holds: fn(&CreditDto, NaiveDate) -> bool,
}

impl CreditRule {
    pub fn check(&self, dto: &CreditDto, today: NaiveDate) -> bool {
        (self.holds)(dto, today)
    }
}

fn credit_value_present(dto: &CreditDto, _today: NaiveDate) -> bool {
    dto.credit_value.is_some()
}

fn credit_value_positive(dto: &CreditDto, _today: NaiveDate) -> bool {
    dto.credit_value.as_ref().map_or(true, |v| *v > BigDecimal::zero())
}

fn credit_value_fits_column(dto: &CreditDto, _today: NaiveDate) -> bool {
    dto.credit_value.as_ref().map_or(true, |v| {
        v.with_scale(CREDIT_VALUE_SCALE) == *v
            && v.abs() < BigDecimal::from(10_i64.pow(CREDIT_VALUE_INTEGER_DIGITS))
    })
}

fn first_installment_in_future(dto: &CreditDto, today: NaiveDate) -> bool {
    dto.day_first_of_installment > today
}

fn installments_at_least_min(dto: &CreditDto, _today: NaiveDate) -> bool {
    dto.number_of_installments >= MIN_INSTALLMENTS
}

fn installments_at_most_max(dto: &CreditDto, _today: NaiveDate) -> bool {
    dto.number_of_installments <= MAX_INSTALLMENTS
}

fn customer_id_present(dto: &CreditDto, _today: NaiveDate) -> bool {
    dto.customer_id.is_some()
}

/// Constraints on a credit request, in evaluation order.
pub const CREDIT_RULES: &[CreditRule] = &[
    CreditRule {
        field: "creditValue",
        code: "required",
        message: "Invalid input",
        holds: credit_value_present,
    },
    CreditRule {
        field: "creditValue",
        code: "positive",
        message: "deve ser maior que 0",
        holds: credit_value_positive,
    },
    CreditRule {
        field: "creditValue",
        code: "digits",
        message: "valor numérico fora do limite (<13 dígitos>.<2 dígitos> esperado)",
        holds: credit_value_fits_column,
    },
    CreditRule {
        field: "dayFirstOfInstallment",
        code: "future",
        message: "deve ser uma data futura",
        holds: first_installment_in_future,
    },
    CreditRule {
        field: "numberOfInstallments",
        code: "min",
        message: "deve ser maior que ou igual à 1",
        holds: installments_at_least_min,
    },
    CreditRule {
        field: "numberOfInstallments",
        code: "max",
        message: "deve ser menor que ou igual à 48",
        holds: installments_at_most_max,
    },
    CreditRule {
        field: "customerId",
        code: "required",
        message: "Invalid input",
        holds: customer_id_present,
    },
];

/// Returned by [`CreditDto::to_entity`] when a required field is absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required field: {0}")]
pub struct MissingField(pub &'static str);

impl CreditDto {
    /// Check every rule against `today`, collecting all violations.
    pub fn validate_on(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for rule in CREDIT_RULES {
            if !rule.check(self, today) {
                errors.add(
                    rule.field,
                    ValidationError::new(rule.code).with_message(Cow::Borrowed(rule.message)),
                );
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build an in-progress credit referencing the requested customer.
    ///
    /// The customer is not looked up here; only its id is carried.
    pub fn to_entity(&self) -> Result<Credit, MissingField> {
        let credit_value = self
            .credit_value
            .clone()
            .ok_or(MissingField("creditValue"))?;
        let customer_id = self.customer_id.ok_or(MissingField("customerId"))?;

        Ok(Credit::new(
            credit_value,
            self.day_first_of_installment,
            self.number_of_installments,
            Customer::reference(customer_id),
        ))
    }
}

impl Validate for CreditDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_on(Local::now().date_naive())
    }
}

/// Customer registration request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[validate(length(min = 1, max = 100, message = "Invalid input"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Invalid input"))]
    pub last_name: String,

    #[validate(custom(function = "validate_cpf", message = "CPF must contain exactly 11 digits"))]
    pub cpf: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 20, message = "Invalid input"))]
    pub zip_code: String,

    #[validate(length(min = 1, max = 255, message = "Invalid input"))]
    pub street: String,
}

fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    if cpf.len() == 11 && cpf.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("cpf"))
    }
}

impl CustomerDto {
    /// Build a customer entity around an already hashed password.
    pub fn to_entity(&self, password_hash: String) -> Customer {
        Customer {
            id: 0,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            cpf: self.cpf.clone(),
            email: self.email.clone(),
            password_hash,
            address: Address {
                zip_code: self.zip_code.clone(),
                street: self.street.clone(),
            },
        }
    }
}

/// Query parameters carrying the owning customer
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdQuery {
    pub customer_id: i64,
}
