//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgCreditRepository, PgCustomerRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let credit_repo = PgCreditRepository::new(pool.clone());
//!     let customer_repo = PgCustomerRepository::new(pool);
//! }
//! ```

pub mod credit_repository;
pub mod customer_repository;

pub use credit_repository::PgCreditRepository;
pub use customer_repository::PgCustomerRepository;
