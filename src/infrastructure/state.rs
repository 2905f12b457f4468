//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::EmployeeRepository;
use crate::infrastructure::SeaOrmEmployeeRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    db: DatabaseConnection,
    /// Employee repository
    pub employee_repo: Arc<dyn EmployeeRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let employee_repo = Arc::new(SeaOrmEmployeeRepository::new(db.clone()));

        Self { db, employee_repo }
    }

    /// Build state around an arbitrary repository implementation
    pub fn with_repository(db: DatabaseConnection, employee_repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { db, employee_repo }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
