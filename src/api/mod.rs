pub mod departments;
pub mod employees;
pub mod error;
pub mod health;

use axum::{Router, routing::get};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route(
            "/health",
            get(health::health_check).fallback(error::route_not_found),
        )
        // Employees
        .route(
            "/employees",
            get(employees::list_employees)
                .post(employees::create_employee)
                .fallback(error::route_not_found),
        )
        .route(
            "/employees/:id",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee)
                .fallback(error::route_not_found),
        )
        // Departments
        .route(
            "/departments",
            get(departments::list_departments).fallback(error::route_not_found),
        )
        .fallback(error::route_not_found)
        .with_state(state)
}
