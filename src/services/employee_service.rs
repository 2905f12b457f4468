//! Employee Service - Pure business logic without HTTP layer

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainError, Employee, EmployeeFilter, EmployeeRepository};
use crate::services::validation::validate_employee;

/// Employee fields as submitted by a client; every field is required
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EmployeePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "hireDate")]
    pub hire_date: Option<String>,
}

/// List employees, optionally restricted to one department
pub async fn list_employees(
    repo: &dyn EmployeeRepository,
    department: Option<String>,
) -> Result<Vec<Employee>, DomainError> {
    let filter = EmployeeFilter {
        department: department.filter(|d| !d.is_empty()),
    };
    repo.find_all(filter).await
}

/// Get a single employee by ID
pub async fn get_employee(repo: &dyn EmployeeRepository, id: i32) -> Result<Employee, DomainError> {
    repo.find_by_id(id).await?.ok_or(DomainError::NotFound)
}

/// Create a new employee
pub async fn create_employee(
    repo: &dyn EmployeeRepository,
    payload: EmployeePayload,
) -> Result<Employee, DomainError> {
    let input = validate_employee(payload)?;
    let employee = repo.create(input).await?;

    tracing::info!(id = employee.id, "Employee created");
    Ok(employee)
}

/// Replace every field of an existing employee.
/// The payload is validated before the id is looked at; `None` is an id
/// that cannot name any row.
pub async fn update_employee(
    repo: &dyn EmployeeRepository,
    id: Option<i32>,
    payload: EmployeePayload,
) -> Result<Employee, DomainError> {
    let input = validate_employee(payload)?;
    let id = id.ok_or(DomainError::NotFound)?;
    let employee = repo.update(id, input).await?;

    tracing::info!(id, "Employee updated");
    Ok(employee)
}

/// Hard-delete an employee
pub async fn delete_employee(repo: &dyn EmployeeRepository, id: i32) -> Result<(), DomainError> {
    repo.delete(id).await?;

    tracing::info!(id, "Employee deleted");
    Ok(())
}

/// Distinct department names, sorted
pub async fn list_departments(repo: &dyn EmployeeRepository) -> Result<Vec<String>, DomainError> {
    repo.distinct_departments().await
}
