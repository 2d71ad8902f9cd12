//! # Domain Layer
//!
//! The domain layer contains the core business types of the credit system.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate domain behavior

pub mod entities;

// Re-export commonly used types
pub use entities::*;
