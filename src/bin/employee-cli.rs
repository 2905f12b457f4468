use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use employee_directory::client::{ApiClient, App, ClientError, DEFAULT_API_URL, EmployeeForm};
use employee_directory::domain::Employee;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Failed to load employees: {0}")]
    Load(String),
}

#[derive(Parser)]
#[command(name = "employee-cli", version, about = "Manage employee records over the REST API")]
struct Cli {
    /// Base URL of the API, including the /api prefix
    #[arg(long, env = "EMPLOYEE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List employees, optionally for one department
    List {
        #[arg(short, long)]
        department: Option<String>,
    },
    /// List distinct department names
    Departments,
    /// Show one employee
    Show { id: i32 },
    /// Create an employee
    Add(FieldArgs),
    /// Edit an employee; omitted fields keep their current value
    Edit {
        id: i32,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete an employee
    Delete {
        id: i32,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    role: Option<String>,
    /// Hire date, e.g. 2024-01-01
    #[arg(long)]
    hire_date: Option<String>,
}

impl FieldArgs {
    fn apply(self, form: &mut EmployeeForm) {
        if let Some(v) = self.name {
            form.name = v;
        }
        if let Some(v) = self.email {
            form.email = v;
        }
        if let Some(v) = self.department {
            form.department = v;
        }
        if let Some(v) = self.role {
            form.role = v;
        }
        if let Some(v) = self.hire_date {
            form.hire_date = v;
        }
    }
}

fn print_employees(employees: &[Employee]) {
    if employees.is_empty() {
        println!("No employees found.");
        return;
    }

    println!(
        "{:>4}  {:<20} {:<28} {:<16} {:<16} {:<10}",
        "ID", "NAME", "EMAIL", "DEPARTMENT", "ROLE", "HIRED"
    );
    for e in employees {
        println!(
            "{:>4}  {:<20} {:<28} {:<16} {:<16} {:<10}",
            e.id, e.name, e.email, e.department, e.role, e.hire_date
        );
    }
}

fn confirm_delete() -> bool {
    print!("Are you sure you want to delete this employee? [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut app = App::new(ApiClient::new(cli.api_url));

    match cli.command {
        Command::List { department } => {
            app.select_department(department).await;
            if let Some(err) = app.error() {
                return Err(CliError::Load(err.to_string()));
            }
            print_employees(app.employees());
        }
        Command::Departments => {
            for department in app.client().list_departments().await? {
                println!("{department}");
            }
        }
        Command::Show { id } => {
            let employee = app.client().get_employee(id).await?;
            print_employees(std::slice::from_ref(&employee));
        }
        Command::Add(fields) => {
            app.start_create();
            fields.apply(app.form_mut());
            let created = app.submit().await?;
            println!("Created employee {}", created.id);
        }
        Command::Edit { id, fields } => {
            let current = app.client().get_employee(id).await?;
            app.start_edit(&current);
            fields.apply(app.form_mut());
            let updated = app.submit().await?;
            print_employees(std::slice::from_ref(&updated));
        }
        Command::Delete { id, yes } => {
            if app.delete(id, || yes || confirm_delete()).await? {
                println!("Employee deleted successfully");
            } else {
                println!("Cancelled.");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
