use axum::{
    Form, Json, async_trait,
    extract::{FromRequest, Path, Query, Request, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiError;
use crate::domain::Employee;
use crate::infrastructure::AppState;
use crate::services::{EmployeePayload, employee_service};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeesQuery {
    /// Exact, case-sensitive department name
    pub department: Option<String>,
}

impl EmployeesQuery {
    /// Build from raw pairs; a repeated key keeps its first value
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let department = pairs
            .into_iter()
            .find(|(key, _)| key == "department")
            .map(|(_, value)| value);
        Self { department }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Request body accepted as JSON or as an urlencoded form.
/// A request with no content type, or one that is neither, is read as an
/// empty payload.
pub struct EmployeeBody(pub EmployeePayload);

#[async_trait]
impl<S> FromRequest<S> for EmployeeBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        match content_type.as_deref().map(BodyKind::from_content_type) {
            None | Some(BodyKind::Other) => Ok(Self(EmployeePayload::default())),
            Some(BodyKind::Form) => {
                let Form(payload) = Form::<EmployeePayload>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::invalid_body(e.body_text()))?;
                Ok(Self(payload))
            }
            Some(BodyKind::Json) => {
                let Json(payload) = Json::<EmployeePayload>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::invalid_body(e.body_text()))?;
                Ok(Self(payload))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn from_content_type(content_type: &str) -> Self {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime == "application/x-www-form-urlencoded" {
            BodyKind::Form
        } else if mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json")) {
            BodyKind::Json
        } else {
            BodyKind::Other
        }
    }
}

// Non-numeric ids can never match a row
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::employee_not_found())
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeesQuery),
    responses(
        (status = 200, description = "Employees in storage order", body = [Employee]),
        (status = 500, description = "Store failure", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let Query(pairs) = query.map_err(|e| {
        ApiError::new(StatusCode::BAD_REQUEST, "Invalid query string").with_message(e.body_text())
    })?;
    let params = EmployeesQuery::from_pairs(pairs);

    employee_service::list_employees(state.employee_repo.as_ref(), params.department)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch employees"))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "The employee", body = Employee),
        (status = 404, description = "No such employee", body = crate::api::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    let id = parse_id(&id)?;

    employee_service::get_employee(state.employee_repo.as_ref(), id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch employee"))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Missing fields or invalid email", body = crate::api::error::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::api::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    EmployeeBody(payload): EmployeeBody,
) -> Result<impl IntoResponse, ApiError> {
    let employee = employee_service::create_employee(state.employee_repo.as_ref(), payload)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to create employee"))?;

    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = i32, Path, description = "Employee id")),
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Missing fields or invalid email", body = crate::api::error::ErrorResponse),
        (status = 404, description = "No such employee", body = crate::api::error::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::api::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    EmployeeBody(payload): EmployeeBody,
) -> Result<Json<Employee>, ApiError> {
    employee_service::update_employee(state.employee_repo.as_ref(), id.parse().ok(), payload)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain(e, "Failed to update employee"))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 404, description = "No such employee", body = crate::api::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;

    employee_service::delete_employee(state.employee_repo.as_ref(), id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to delete employee"))?;

    Ok(Json(MessageResponse {
        message: "Employee deleted successfully".to_string(),
    }))
}
