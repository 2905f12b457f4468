use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Employee;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub department: String,
    pub role: String,
    #[sea_orm(column_name = "hireDate")]
    #[serde(rename = "hireDate")]
    pub hire_date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Employee {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            department: model.department,
            role: model.role,
            hire_date: model.hire_date,
        }
    }
}
