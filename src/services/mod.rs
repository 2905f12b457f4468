//! Services Layer
//!
//! Pure business logic extracted from HTTP handlers: validation first,
//! then a single repository call.

pub mod employee_service;
pub mod validation;

// Re-export for convenience
pub use employee_service::EmployeePayload;
pub use validation::{REQUIRED_FIELDS, is_valid_email};
