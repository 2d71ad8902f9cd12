//! # Domain Entities
//!
//! Core domain entities of the credit application system.
//! All entities map directly to their corresponding database tables.
//!
//! - **Customer**: A person that applies for credit
//! - **Credit**: A financing agreement with an installment schedule
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod credit;
mod customer;

pub use credit::{
    Credit, CreditRepository, Status, CREDIT_VALUE_INTEGER_DIGITS, CREDIT_VALUE_SCALE,
    MAX_INSTALLMENTS, MIN_INSTALLMENTS,
};
pub use customer::{Address, Customer, CustomerRepository};

#[cfg(test)]
pub use credit::MockCreditRepository;
#[cfg(test)]
pub use customer::MockCustomerRepository;
