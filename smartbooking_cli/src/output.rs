use serde::Serialize;
use smartbooking_lib::types::{parse_timestamp, Department, User};
use smartbooking_lib::{Identity, Notification, Notifier, Severity};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct UserRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Username")]
    #[serde(rename = "Username")]
    username: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    #[serde(rename = "Role")]
    role: String,
    #[tabled(rename = "Department")]
    #[serde(rename = "Department")]
    department: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
}

#[derive(Tabled, Serialize)]
struct DepartmentRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

// -- Row builders --

fn build_user_rows(users: &[User]) -> Vec<UserRow> {
    users
        .iter()
        .map(|u| UserRow {
            id: u.id,
            username: u.username.clone(),
            name: u.full_name(),
            email: u.email.clone(),
            role: capitalize(&u.role.to_string()),
            department: u.department.clone(),
            status: capitalize(&u.status.to_string()),
            created: format_date(u.created_at.as_deref()),
        })
        .collect()
}

fn build_department_rows(departments: &[Department]) -> Vec<DepartmentRow> {
    departments
        .iter()
        .map(|d| DepartmentRow {
            id: d.id,
            name: d.name.clone(),
            description: d.description.clone().unwrap_or_default(),
            status: if d.is_active { "Active" } else { "Inactive" }.to_string(),
            created: format_date(d.created_at.as_deref()),
        })
        .collect()
}

fn build_identity_rows(identity: &Identity) -> Vec<FieldRow> {
    vec![
        FieldRow { field: "ID", value: identity.id.clone() },
        FieldRow { field: "Name", value: identity.name.clone() },
        FieldRow { field: "Email", value: identity.email.clone() },
        FieldRow { field: "Role", value: capitalize(&identity.role) },
    ]
}

fn render<R: Tabled>(rows: Vec<R>, format: &OutputFormat) {
    let mut table = Table::new(rows);
    if let OutputFormat::Markdown = format {
        table.with(Style::markdown());
    }
    println!("{}", table);
}

// -- Public printers --

pub fn print_users(users: &[User], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&users),
        _ => render(build_user_rows(users), format),
    }
}

pub fn print_departments(departments: &[Department], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&departments),
        _ => render(build_department_rows(departments), format),
    }
}

pub fn print_identity(identity: &Identity, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(identity),
        _ => render(build_identity_rows(identity), format),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Prints notifications to stderr so they never mix with table or JSON output.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, n: Notification) {
        eprintln!("{}", format_notification(&n));
    }
}

fn format_notification(n: &Notification) -> String {
    let tag = match n.severity {
        Severity::Success => "ok",
        Severity::Warn => "warn",
        Severity::Error => "error",
    };
    format!("[{}] {}: {}", tag, n.summary, n.detail)
}

/// Short calendar date, e.g. "Nov 24, 2025". Unparseable values are shown as-is.
fn format_date(raw: Option<&str>) -> String {
    match raw {
        None => "-".to_string(),
        Some(s) => parse_timestamp(s)
            .map(|dt| dt.format("%b %d, %Y").to_string())
            .unwrap_or_else(|| s.to_string()),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
