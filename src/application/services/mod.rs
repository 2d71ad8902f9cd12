//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **CreditService**: Credit storage and lookup by customer or code
//! - **CustomerService**: Customer registration and lookup

pub mod credit_service;
pub mod customer_service;

pub use credit_service::{CreditError, CreditService, CreditServiceImpl};
pub use customer_service::{CustomerError, CustomerService, CustomerServiceImpl};

#[cfg(test)]
pub use credit_service::MockCreditService;
#[cfg(test)]
pub use customer_service::MockCustomerService;
