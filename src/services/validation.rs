//! Input validation shared by create and update

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{EmployeeInput, ValidationError};
use crate::services::employee_service::EmployeePayload;

/// Field names as they appear on the wire, in form order
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "email", "department", "role", "hireDate"];

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Check that every field is present and the email is well-formed
pub fn validate_employee(payload: EmployeePayload) -> Result<EmployeeInput, ValidationError> {
    let (Some(name), Some(email), Some(department), Some(role), Some(hire_date)) = (
        present(payload.name),
        present(payload.email),
        present(payload.department),
        present(payload.role),
        present(payload.hire_date),
    ) else {
        return Err(ValidationError::MissingFields);
    };

    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(EmployeeInput {
        name,
        email,
        department,
        role,
        hire_date,
    })
}
