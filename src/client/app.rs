//! Client-side view state: the employee list, the department filter and the form

use crate::client::api::{ApiClient, ClientError, EmployeeForm};
use crate::domain::Employee;

/// Whether the form is hidden, creating a new record, or editing one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiMode {
    #[default]
    Idle,
    Creating,
    Editing(i32),
}

pub struct App {
    client: ApiClient,
    employees: Vec<Employee>,
    departments: Vec<String>,
    selected_department: Option<String>,
    form: EmployeeForm,
    mode: UiMode,
    error: Option<String>,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            employees: Vec::new(),
            departments: Vec::new(),
            selected_department: None,
            form: EmployeeForm::default(),
            mode: UiMode::Idle,
            error: None,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    pub fn selected_department(&self) -> Option<&str> {
        self.selected_department.as_deref()
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EmployeeForm {
        &mut self.form
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reload the list (respecting the filter) and the department names
    pub async fn refresh(&mut self) {
        self.fetch_employees().await;
        self.fetch_departments().await;
    }

    async fn fetch_employees(&mut self) {
        match self
            .client
            .list_employees(self.selected_department.as_deref())
            .await
        {
            Ok(employees) => {
                self.employees = employees;
                self.error = None;
            }
            Err(e) => self.error = Some(format!("Failed to load employees: {e}")),
        }
    }

    async fn fetch_departments(&mut self) {
        match self.client.list_departments().await {
            Ok(departments) => self.departments = departments,
            Err(e) => tracing::warn!("Failed to load departments: {}", e),
        }
    }

    /// Change the filter; `None` or an empty string shows every department
    pub async fn select_department(&mut self, department: Option<String>) {
        self.selected_department = department.filter(|d| !d.is_empty());
        self.fetch_employees().await;
    }

    pub fn start_create(&mut self) {
        self.form = EmployeeForm::default();
        self.mode = UiMode::Creating;
    }

    pub fn start_edit(&mut self, employee: &Employee) {
        self.form = EmployeeForm::from(employee);
        self.mode = UiMode::Editing(employee.id);
    }

    pub fn cancel(&mut self) {
        self.form = EmployeeForm::default();
        self.mode = UiMode::Idle;
    }

    /// Send the form. On failure the form and mode stay as they were.
    pub async fn submit(&mut self) -> Result<Employee, ClientError> {
        self.error = None;

        let result = match self.mode {
            UiMode::Idle => Err(ClientError::NoActiveForm),
            UiMode::Creating => self.client.create_employee(&self.form).await,
            UiMode::Editing(id) => self.client.update_employee(id, &self.form).await,
        };

        match result {
            Ok(employee) => {
                self.cancel();
                self.refresh().await;
                Ok(employee)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Delete after `confirm` agrees. Returns `Ok(false)` when declined.
    pub async fn delete<F>(&mut self, id: i32, confirm: F) -> Result<bool, ClientError>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return Ok(false);
        }

        match self.client.delete_employee(id).await {
            Ok(_) => {
                self.refresh().await;
                Ok(true)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn employee(id: i32, department: &str) -> Employee {
        Employee {
            id,
            name: format!("Employee {id}"),
            email: format!("e{id}@x.com"),
            department: department.to_string(),
            role: "Dev".to_string(),
            hire_date: "2024-01-01".to_string(),
        }
    }

    async fn mount_lists(server: &MockServer, employees: Vec<Employee>, departments: Vec<&str>) {
        Mock::given(method("GET"))
            .and(path("/api/employees"))
            .respond_with(ResponseTemplate::new(200).set_body_json(employees))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/departments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(departments))
            .mount(server)
            .await;
    }

    fn app_for(server: &MockServer) -> App {
        App::new(ApiClient::new(format!("{}/api", server.uri())))
    }

    #[test]
    fn test_mode_transitions() {
        let mut app = App::new(ApiClient::new("http://localhost:1/api"));
        assert_eq!(app.mode(), UiMode::Idle);

        app.start_create();
        assert_eq!(app.mode(), UiMode::Creating);
        assert_eq!(app.form(), &EmployeeForm::default());

        let existing = employee(7, "Eng");
        app.start_edit(&existing);
        assert_eq!(app.mode(), UiMode::Editing(7));
        assert_eq!(app.form().email, "e7@x.com");

        app.cancel();
        assert_eq!(app.mode(), UiMode::Idle);
        assert_eq!(app.form(), &EmployeeForm::default());
    }

    #[tokio::test]
    async fn test_refresh_loads_lists() {
        let server = MockServer::start().await;
        mount_lists(&server, vec![employee(1, "Eng")], vec!["Eng"]).await;

        let mut app = app_for(&server);
        app.refresh().await;

        assert_eq!(app.employees().len(), 1);
        assert_eq!(app.departments(), ["Eng".to_string()]);
        assert!(app.error().is_none());
    }

    #[tokio::test]
    async fn test_submit_create_resets_form_and_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/employees"))
            .respond_with(ResponseTemplate::new(201).set_body_json(employee(1, "Eng")))
            .expect(1)
            .mount(&server)
            .await;
        mount_lists(&server, vec![employee(1, "Eng")], vec!["Eng"]).await;

        let mut app = app_for(&server);
        app.start_create();
        app.form_mut().name = "Employee 1".into();

        let created = app.submit().await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(app.mode(), UiMode::Idle);
        assert_eq!(app.form(), &EmployeeForm::default());
        assert_eq!(app.employees().len(), 1);
        assert_eq!(app.departments().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form_and_mode() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/employees/3"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "error": "Employee with this email already exists"
            })))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.start_edit(&employee(3, "Eng"));
        app.form_mut().email = "taken@x.com".into();

        let err = app.submit().await.unwrap_err();

        assert_eq!(err.status(), Some(reqwest::StatusCode::CONFLICT));
        assert_eq!(app.mode(), UiMode::Editing(3));
        assert_eq!(app.form().email, "taken@x.com");
        assert_eq!(app.error(), Some("Employee with this email already exists"));
    }

    #[tokio::test]
    async fn test_submit_while_idle_is_rejected() {
        let mut app = App::new(ApiClient::new("http://localhost:1/api"));
        assert!(matches!(app.submit().await, Err(ClientError::NoActiveForm)));
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        let deleted = app.delete(1, || false).await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/employees/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "message": "Employee deleted successfully" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        mount_lists(&server, vec![], vec![]).await;

        let mut app = app_for(&server);
        assert!(app.delete(1, || true).await.unwrap());
        assert!(app.employees().is_empty());
    }

    #[tokio::test]
    async fn test_select_department_filters_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/employees"))
            .and(query_param("department", "Ops"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![employee(2, "Ops")]))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.select_department(Some("Ops".to_string())).await;

        assert_eq!(app.selected_department(), Some("Ops"));
        assert_eq!(app.employees()[0].department, "Ops");
    }

    #[tokio::test]
    async fn test_list_failure_keeps_previous_rows() {
        let server = MockServer::start().await;
        mount_lists(&server, vec![employee(1, "Eng")], vec!["Eng"]).await;

        let mut app = app_for(&server);
        app.refresh().await;

        server.reset().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": "Failed to fetch employees"
            })))
            .mount(&server)
            .await;

        app.refresh().await;

        assert_eq!(app.employees().len(), 1);
        assert_eq!(app.departments().len(), 1);
        assert_eq!(
            app.error(),
            Some("Failed to load employees: Failed to fetch employees")
        );
    }
}
