use axum::{Json, extract::State};

use crate::api::error::ApiError;
use crate::infrastructure::AppState;
use crate::services::employee_service;

#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "Distinct department names, sorted", body = [String]),
        (status = 500, description = "Store failure", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn list_departments(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    employee_service::list_departments(state.employee_repo.as_ref())
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch departments"))
}
