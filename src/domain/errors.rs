//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use thiserror::Error;

/// Input rejected before it reaches the store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more of the mandatory fields is absent or empty
    #[error("All fields are required")]
    MissingFields,
    /// Email does not look like `local@domain.tld`
    #[error("Invalid email format")]
    InvalidEmail,
}

#[derive(Debug, Error)]
pub enum DomainError {
    /// Resource not found
    #[error("Resource not found")]
    NotFound,
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    /// Write would break a uniqueness constraint
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Driver message without the variant prefix
    pub fn detail(&self) -> String {
        match self {
            DomainError::Conflict(msg) | DomainError::Database(msg) | DomainError::Internal(msg) => {
                msg.clone()
            }
            other => other.to_string(),
        }
    }
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
            return DomainError::Conflict(msg);
        }

        let msg = e.to_string();
        // Some drivers only surface the constraint name in the message
        if msg.contains("UNIQUE constraint failed") {
            DomainError::Conflict(msg)
        } else {
            DomainError::Database(msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_message_maps_to_conflict() {
        let err = sea_orm::DbErr::Custom(
            "UNIQUE constraint failed: employees.email".to_string(),
        );
        assert!(matches!(DomainError::from(err), DomainError::Conflict(_)));
    }

    #[test]
    fn test_other_db_errors_map_to_database() {
        let err = sea_orm::DbErr::Custom("disk I/O error".to_string());
        match DomainError::from(err) {
            DomainError::Database(msg) => assert!(msg.contains("disk I/O error")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::MissingFields.to_string(), "All fields are required");
        assert_eq!(ValidationError::InvalidEmail.to_string(), "Invalid email format");
    }
}
