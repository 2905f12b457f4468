//! Thin reqwest wrapper over the REST API

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::error::ErrorResponse;
use crate::domain::Employee;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    /// Non-success response; `message` is the body's `error` string
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    #[error("No employee form is open")]
    NoActiveForm,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            ClientError::NoActiveForm => None,
        }
    }
}

/// Form fields sent on create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeForm {
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    #[serde(rename = "hireDate")]
    pub hire_date: String,
}

impl From<&Employee> for EmployeeForm {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
            role: employee.role.clone(),
            hire_date: employee.hire_date.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: Response, fallback: &str) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| fallback.to_string());

        Err(ClientError::Api { status, message })
    }

    pub async fn list_employees(&self, department: Option<&str>) -> Result<Vec<Employee>, ClientError> {
        let mut request = self.http.get(self.url("/employees"));
        if let Some(department) = department.filter(|d| !d.is_empty()) {
            request = request.query(&[("department", department)]);
        }

        let response = Self::check(request.send().await?, "Failed to fetch employees").await?;
        Ok(response.json().await?)
    }

    pub async fn get_employee(&self, id: i32) -> Result<Employee, ClientError> {
        let response = self.http.get(self.url(&format!("/employees/{id}"))).send().await?;
        let response = Self::check(response, "Failed to fetch employee").await?;
        Ok(response.json().await?)
    }

    pub async fn create_employee(&self, form: &EmployeeForm) -> Result<Employee, ClientError> {
        let response = self.http.post(self.url("/employees")).json(form).send().await?;
        let response = Self::check(response, "Failed to save employee").await?;
        Ok(response.json().await?)
    }

    pub async fn update_employee(&self, id: i32, form: &EmployeeForm) -> Result<Employee, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/employees/{id}")))
            .json(form)
            .send()
            .await?;
        let response = Self::check(response, "Failed to save employee").await?;
        Ok(response.json().await?)
    }

    /// Returns the server's confirmation message
    pub async fn delete_employee(&self, id: i32) -> Result<String, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/employees/{id}")))
            .send()
            .await?;
        let response = Self::check(response, "Failed to delete employee").await?;
        Ok(response.json::<MessageBody>().await?.message)
    }

    pub async fn list_departments(&self) -> Result<Vec<String>, ClientError> {
        let response = self.http.get(self.url("/departments")).send().await?;
        let response = Self::check(response, "Failed to fetch departments").await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ann() -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "name": "Ann",
            "email": "ann@x.com",
            "department": "Eng",
            "role": "Dev",
            "hireDate": "2024-01-01"
        })
    }

    #[tokio::test]
    async fn test_list_employees_sends_department_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/employees"))
            .and(query_param("department", "R&D"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([ann()])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(format!("{}/api/", server.uri()));
        let employees = client.list_employees(Some("R&D")).await.unwrap();

        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].hire_date, "2024-01-01");
    }

    #[tokio::test]
    async fn test_create_posts_camel_case_body() {
        let server = MockServer::start().await;
        let form = EmployeeForm {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            department: "Eng".into(),
            role: "Dev".into(),
            hire_date: "2024-01-01".into(),
        };
        Mock::given(method("POST"))
            .and(path("/api/employees"))
            .and(body_json(serde_json::json!({
                "name": "Ann",
                "email": "ann@x.com",
                "department": "Eng",
                "role": "Dev",
                "hireDate": "2024-01-01"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(ann()))
            .mount(&server)
            .await;

        let client = ApiClient::new(format!("{}/api", server.uri()));
        let created = client.create_employee(&form).await.unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_error_body_becomes_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/employees/9"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "error": "Employee not found" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(format!("{}/api", server.uri()));
        let err = client.delete_employee(9).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "Employee not found");
    }

    #[tokio::test]
    async fn test_non_json_error_uses_fallback_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/departments"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = ApiClient::new(format!("{}/api", server.uri()));
        let err = client.list_departments().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch departments");
    }
}
