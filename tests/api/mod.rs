//! API Integration Tests
//!
//! Exercises the HTTP routes end to end over in-memory repositories.

mod credit_tests;
mod customer_tests;
