//! Client-side form validation and input sanitization.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use smartbooking_api::types::{DepartmentForm, UserForm};

use crate::error::AdminError;

pub const MAX_FILTER_LENGTH: usize = 100;

/// Field-scoped validation messages, keyed by the wire name of the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when no field failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

/// A create/update payload that can be checked before it is sent.
///
/// `Default` must produce the empty shape used for a new record.
pub trait FormModel: Default + Clone + Serialize + Send + Sync + 'static {
    fn validate(&self) -> Result<(), FieldErrors>;

    /// Payload actually sent on create. Stamps creation metadata where the
    /// resource expects it.
    fn prepare_for_create(&self, _now: DateTime<FixedOffset>) -> Self {
        self.clone()
    }
}

fn require(errors: &mut FieldErrors, field: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, &format!("{} is required.", label));
    }
}

impl FormModel for UserForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "username", "Username", &self.username);
        require(&mut errors, "email", "Email", &self.email);
        require(&mut errors, "firstName", "First name", &self.first_name);
        require(&mut errors, "lastName", "Last name", &self.last_name);
        errors.into_result()
    }
}

impl FormModel for DepartmentForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", "Name", &self.name);
        errors.into_result()
    }

    fn prepare_for_create(&self, now: DateTime<FixedOffset>) -> Self {
        Self {
            created_at: Some(now.format("%Y-%m-%dT%H:%M:%S").to_string()),
            ..self.clone()
        }
    }
}

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit. An empty result is allowed and means "no filter".
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, AdminError> {
    if input.len() > max_len {
        return Err(AdminError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    Ok(input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string())
}

/// Validate list filter text typed into a search box.
pub fn validate_filter(input: &str) -> Result<String, AdminError> {
    sanitize_text(input, MAX_FILTER_LENGTH)
}

/// Validate a rows-per-page value against the offered options.
pub fn validate_rows_per_page(rows: u64) -> Result<u64, AdminError> {
    if smartbooking_api::ROWS_PER_PAGE_OPTIONS.contains(&rows) {
        Ok(rows)
    } else {
        Err(AdminError::InvalidInput(format!(
            "rows per page must be one of {:?}, got {}",
            smartbooking_api::ROWS_PER_PAGE_OPTIONS,
            rows
        )))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn empty_user_form_reports_every_required_field() {
        let errors = UserForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("username"), Some("Username is required."));
        assert_eq!(errors.get("lastName"), Some("Last name is required."));
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let form = UserForm {
            username: "jdoe".to_string(),
            email: "   ".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            ..UserForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email"]);
    }

    #[test]
    fn department_name_required() {
        let errors = DepartmentForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required."));

        let ok = DepartmentForm {
            name: "Legal".to_string(),
            ..DepartmentForm::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn department_create_is_stamped_in_local_time() {
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2025, 11, 24, 18, 5, 42).unwrap();
        let form = DepartmentForm {
            name: "Legal".to_string(),
            ..DepartmentForm::default()
        };
        let stamped = form.prepare_for_create(now);
        assert_eq!(stamped.created_at.as_deref(), Some("2025-11-24T18:05:42"));
        assert_eq!(form.created_at, None);
    }

    #[test]
    fn user_create_is_sent_unchanged() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let now = offset.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let form = UserForm {
            username: "a".to_string(),
            ..UserForm::default()
        };
        assert_eq!(form.prepare_for_create(now), form);
    }

    #[test]
    fn sanitize_strips_control_chars() {
        assert_eq!(validate_filter("  ops\u{7}team \n").unwrap(), "opsteam");
        assert_eq!(validate_filter("").unwrap(), "");
        assert!(validate_filter(&"x".repeat(101)).is_err());
    }

    #[test]
    fn rows_per_page_options() {
        assert_eq!(validate_rows_per_page(25).unwrap(), 25);
        assert!(validate_rows_per_page(0).is_err());
        assert!(validate_rows_per_page(7).is_err());
    }
}
