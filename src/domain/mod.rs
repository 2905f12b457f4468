//! Domain layer - Pure business abstractions
//!
//! Trait definitions, record types and domain error types.
//! Implementations live in the infrastructure layer.

pub mod errors;
pub mod repositories;

pub use errors::{DomainError, ValidationError};
pub use repositories::*;
