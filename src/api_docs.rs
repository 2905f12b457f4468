use crate::api;
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::employees::list_employees,
        api::employees::get_employee,
        api::employees::create_employee,
        api::employees::update_employee,
        api::employees::delete_employee,
        api::departments::list_departments,
    ),
    components(
        schemas(
            crate::domain::Employee,
            crate::services::EmployeePayload,
            api::employees::MessageResponse,
            api::error::ErrorResponse,
        )
    ),
    tags(
        (name = "employee-directory", description = "Employee Directory API")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
