//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{CreditDto, CustomerDto, CustomerIdQuery, MissingField, CREDIT_RULES};
pub use response::{
    credit_saved_message, customer_saved_message, CreditView, CreditViewList, CustomerView,
};
