//! SeaORM implementation of EmployeeRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{DomainError, Employee, EmployeeFilter, EmployeeInput, EmployeeRepository};
use crate::models::employee::{ActiveModel, Column, Entity as EmployeeEntity};

/// SeaORM-based implementation of EmployeeRepository
pub struct SeaOrmEmployeeRepository {
    db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn find_all(&self, filter: EmployeeFilter) -> Result<Vec<Employee>, DomainError> {
        let mut query = EmployeeEntity::find();

        if let Some(department) = &filter.department
            && !department.is_empty()
        {
            query = query.filter(Column::Department.eq(department.as_str()));
        }

        let employees = query.all(&self.db).await?;
        Ok(employees.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DomainError> {
        let employee = EmployeeEntity::find_by_id(id).one(&self.db).await?;
        Ok(employee.map(Employee::from))
    }

    async fn create(&self, input: EmployeeInput) -> Result<Employee, DomainError> {
        let employee = ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            department: Set(input.department),
            role: Set(input.role),
            hire_date: Set(input.hire_date),
            ..Default::default()
        };

        let result = employee.insert(&self.db).await?;
        Ok(Employee::from(result))
    }

    async fn update(&self, id: i32, input: EmployeeInput) -> Result<Employee, DomainError> {
        // Single UPDATE so "no such row" and "email taken" come from the same statement
        let result = EmployeeEntity::update_many()
            .col_expr(Column::Name, Expr::value(input.name.clone()))
            .col_expr(Column::Email, Expr::value(input.email.clone()))
            .col_expr(Column::Department, Expr::value(input.department.clone()))
            .col_expr(Column::Role, Expr::value(input.role.clone()))
            .col_expr(Column::HireDate, Expr::value(input.hire_date.clone()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(input.into_employee(id))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = EmployeeEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn distinct_departments(&self) -> Result<Vec<String>, DomainError> {
        let departments = EmployeeEntity::find()
            .select_only()
            .column(Column::Department)
            .distinct()
            .order_by_asc(Column::Department)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(departments)
    }
}
