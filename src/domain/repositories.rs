//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::DomainError;

/// Employee data for API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    #[serde(rename = "hireDate")]
    pub hire_date: String,
}

/// Validated mutable fields of an employee, used for both create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub hire_date: String,
}

impl EmployeeInput {
    /// Attach a store-assigned id
    pub fn into_employee(self, id: i32) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            department: self.department,
            role: self.role,
            hire_date: self.hire_date,
        }
    }
}

/// Filter criteria for employee queries
#[derive(Debug, Default, Clone)]
pub struct EmployeeFilter {
    /// Exact, case-sensitive department match
    pub department: Option<String>,
}

/// Repository trait for Employee entity
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find all employees matching the filter, in storage order
    async fn find_all(&self, filter: EmployeeFilter) -> Result<Vec<Employee>, DomainError>;

    /// Find an employee by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DomainError>;

    /// Create a new employee; the store assigns the id
    async fn create(&self, input: EmployeeInput) -> Result<Employee, DomainError>;

    /// Replace every mutable field of an existing employee
    async fn update(&self, id: i32, input: EmployeeInput) -> Result<Employee, DomainError>;

    /// Delete an employee by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Sorted distinct department values across all rows
    async fn distinct_departments(&self) -> Result<Vec<String>, DomainError>;
}
