//! Client Application
//!
//! `ApiClient` speaks HTTP/JSON to the REST API; `App` keeps the list,
//! filter and form state and re-fetches after every mutation.

pub mod api;
pub mod app;

pub use api::{ApiClient, ClientError, DEFAULT_API_URL, EmployeeForm};
pub use app::{App, UiMode};
