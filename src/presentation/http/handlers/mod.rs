//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod credit;
pub mod customer;
pub mod health;
