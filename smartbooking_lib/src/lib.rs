//! Library layer for the SmartBooking admin console: a generic list view
//! controller over any resource backend, the mutation pipeline that refreshes
//! it, form validation, and notifications.
//!
//! Wraps the `smartbooking_api` crate, which owns the HTTP transport, the
//! OData query encoder, and the wire types.

pub mod config;
pub mod controller;
pub mod error;
pub mod forms;
pub mod memory;
pub mod mutation;
pub mod notify;
pub mod resource;
pub mod validation;

pub use smartbooking_api;
pub use smartbooking_api::types;
pub use smartbooking_api::{
    decode_identity_claims, Client, Identity, ListQuery, Query, Session, SortDirection,
    DEFAULT_ROWS_PER_PAGE, DEPARTMENT_RESOURCE, ROWS_PER_PAGE_OPTIONS, USER_RESOURCE,
};

pub use config::Settings;
pub use controller::{ListController, ListState, LoadOutcome, LoadStatus};
pub use error::AdminError;
pub use forms::FormDialog;
pub use memory::{MemoryRecord, MemoryResource};
pub use mutation::{MutationCoordinator, MutationRequest};
pub use notify::{MemoryNotifier, Notification, Notifier, Severity, TracingNotifier};
pub use resource::{DepartmentResource, Record, RemoteResource, ResourceAccess, UserResource};
pub use validation::{FieldErrors, FormModel};
