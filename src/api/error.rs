//! HTTP error mapping for the REST API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainError, ValidationError};
use crate::services::REQUIRED_FIELDS;

pub const EMPLOYEE_NOT_FOUND: &str = "Employee not found";
pub const ROUTE_NOT_FOUND: &str = "Route not found";
pub const EMAIL_CONFLICT: &str = "Employee with this email already exists";

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

/// Status code plus JSON body, returned from every failing handler
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.into(),
                message: None,
                required: None,
            },
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }

    pub fn employee_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, EMPLOYEE_NOT_FOUND)
    }

    pub fn route_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND)
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid request body").with_message(message)
    }

    pub fn internal(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error).with_message(message)
    }

    /// Map a domain failure; `failure` names the operation for 5xx bodies
    pub fn from_domain(err: DomainError, failure: &str) -> Self {
        match err {
            DomainError::NotFound => Self::employee_not_found(),
            DomainError::Validation(ValidationError::MissingFields) => {
                let mut api_err =
                    Self::new(StatusCode::BAD_REQUEST, ValidationError::MissingFields.to_string());
                api_err.body.required = Some(REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect());
                api_err
            }
            DomainError::Validation(v) => Self::new(StatusCode::BAD_REQUEST, v.to_string()),
            DomainError::Conflict(detail) => {
                tracing::debug!(%detail, "Uniqueness violation");
                Self::new(StatusCode::CONFLICT, EMAIL_CONFLICT)
            }
            err @ (DomainError::Database(_) | DomainError::Internal(_)) => {
                tracing::error!(error = %err, "{}", failure);
                Self::internal(failure, err.detail())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Fallback for unmatched routes and methods
pub async fn route_not_found() -> ApiError {
    ApiError::route_not_found()
}
