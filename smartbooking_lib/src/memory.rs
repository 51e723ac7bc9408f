//! In-memory resource backend: filters, sorts and pages a local `Vec`.
//!
//! Behaves like the REST backend as far as the list screens can tell, which
//! makes it useful for demos and for exercising controllers without a server.

use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use smartbooking_api::types::{
    Department, DepartmentForm, ListResult, RecordId, User, UserForm, UserStatus,
};
use smartbooking_api::{Error, ListQuery, SortDirection};

use crate::resource::{Record, ResourceAccess};
use crate::validation::FormModel;

/// A record type the in-memory backend knows how to search, sort and edit.
pub trait MemoryRecord: Record {
    type Form: FormModel;

    /// Field values matched by the free-text filter.
    fn search_fields(&self) -> Vec<&str>;
    /// Value of a sortable field by its wire name; `None` sorts as empty.
    fn sort_value(&self, field: &str) -> Option<String>;
    fn from_form(id: RecordId, form: &Self::Form) -> Self;
    fn apply_form(&mut self, form: &Self::Form);
    fn set_active(&mut self, active: bool);
}

pub struct MemoryResource<T: MemoryRecord> {
    label: &'static str,
    records: Mutex<Vec<T>>,
    fetches: AtomicUsize,
    writes: AtomicUsize,
}

impl<T: MemoryRecord> MemoryResource<T> {
    pub fn new(label: &'static str, records: Vec<T>) -> Self {
        Self {
            label,
            records: Mutex::new(records),
            fetches: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn records(&self) -> Vec<T> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of `fetch_list` calls served.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(AtomicOrdering::SeqCst)
    }

    /// Number of mutating calls served.
    pub fn write_count(&self) -> usize {
        self.writes.load(AtomicOrdering::SeqCst)
    }

    fn with_records<O>(&self, f: impl FnOnce(&mut Vec<T>) -> O) -> O {
        self.writes.fetch_add(1, AtomicOrdering::SeqCst);
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut records)
    }
}

fn not_found(id: RecordId) -> Error {
    Error::HttpStatus {
        status: 404,
        body: format!("record {} not found", id),
    }
}

#[async_trait]
impl<T: MemoryRecord> ResourceAccess for MemoryResource<T> {
    type Item = T;
    type Form = <T as MemoryRecord>::Form;

    fn label(&self) -> &str {
        self.label
    }

    async fn fetch_list(&self, query: &ListQuery) -> Result<ListResult<T>, Error> {
        self.fetches.fetch_add(1, AtomicOrdering::SeqCst);
        let mut matched: Vec<T> = {
            let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
            match query.filter_text.as_deref().filter(|f| !f.is_empty()) {
                Some(filter) => {
                    let needle = filter.to_lowercase();
                    records
                        .iter()
                        .filter(|r| {
                            r.search_fields()
                                .iter()
                                .any(|field| field.to_lowercase().contains(&needle))
                        })
                        .cloned()
                        .collect()
                }
                None => records.clone(),
            }
        };

        if let Some(field) = query.sort_field.as_deref() {
            let direction = query.sort_direction;
            if direction != SortDirection::None {
                matched.sort_by(|a, b| {
                    let ord = a
                        .sort_value(field)
                        .unwrap_or_default()
                        .cmp(&b.sort_value(field).unwrap_or_default());
                    match direction {
                        SortDirection::Descending => ord.reverse(),
                        _ => ord,
                    }
                });
            }
        }

        let total_count = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit.max(1) as usize)
            .collect();
        Ok(ListResult { items, total_count })
    }

    async fn create(&self, form: &Self::Form) -> Result<(), Error> {
        self.with_records(|records| {
            let id = records.iter().map(Record::id).max().unwrap_or(0) + 1;
            records.push(T::from_form(id, form));
        });
        Ok(())
    }

    async fn update(&self, id: RecordId, form: &Self::Form) -> Result<(), Error> {
        self.with_records(|records| match records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                record.apply_form(form);
                Ok(())
            }
            None => Err(not_found(id)),
        })
    }

    async fn delete(&self, ids: &[RecordId]) -> Result<(), Error> {
        self.with_records(|records| records.retain(|r| !ids.contains(&r.id())));
        Ok(())
    }

    async fn set_active(&self, ids: &[RecordId], active: bool) -> Result<(), Error> {
        self.with_records(|records| {
            records
                .iter_mut()
                .filter(|r| ids.contains(&r.id()))
                .for_each(|r| r.set_active(active));
        });
        Ok(())
    }
}

fn now_stamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

impl MemoryRecord for User {
    type Form = UserForm;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.username.as_str(),
            self.email.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.department.as_str(),
        ]
    }

    fn sort_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(format!("{:020}", self.id)),
            "username" => Some(self.username.clone()),
            "email" => Some(self.email.clone()),
            "firstName" => Some(self.first_name.clone()),
            "lastName" => Some(self.last_name.clone()),
            "role" => Some(self.role.to_string()),
            "department" => Some(self.department.clone()),
            "status" => Some(self.status.to_string()),
            "createdAt" => self.created_at.clone(),
            "updatedAt" => self.updated_at.clone(),
            "phone" => self.phone.clone(),
            _ => None,
        }
    }

    fn from_form(id: RecordId, form: &UserForm) -> Self {
        let now = now_stamp();
        Self {
            id,
            username: form.username.clone(),
            email: form.email.clone(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            role: form.role,
            department: form.department.clone(),
            status: form.status,
            created_at: Some(now.clone()),
            updated_at: Some(now),
            avatar: None,
            phone: form.phone.clone(),
        }
    }

    fn apply_form(&mut self, form: &UserForm) {
        self.username = form.username.clone();
        self.email = form.email.clone();
        self.first_name = form.first_name.clone();
        self.last_name = form.last_name.clone();
        self.role = form.role;
        self.department = form.department.clone();
        self.status = form.status;
        self.phone = form.phone.clone();
        self.updated_at = Some(now_stamp());
    }

    fn set_active(&mut self, active: bool) {
        self.status = if active {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        };
        self.updated_at = Some(now_stamp());
    }
}

impl MemoryRecord for Department {
    type Form = DepartmentForm;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(desc) = &self.description {
            fields.push(desc);
        }
        fields
    }

    fn sort_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(format!("{:020}", self.id)),
            "name" => Some(self.name.clone()),
            "description" => self.description.clone(),
            "isActive" => Some(self.is_active.to_string()),
            "createdAt" => self.created_at.clone(),
            _ => None,
        }
    }

    fn from_form(id: RecordId, form: &DepartmentForm) -> Self {
        Self {
            id,
            name: form.name.clone(),
            description: form.description.clone(),
            is_active: form.is_active,
            created_at: form.created_at.clone().or_else(|| Some(now_stamp())),
        }
    }

    fn apply_form(&mut self, form: &DepartmentForm) {
        self.name = form.name.clone();
        self.description = form.description.clone();
        self.is_active = form.is_active;
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}
