//! Typed client for the SmartBooking admin API: OData list queries,
//! bearer-token session, and record types.

mod claims;
mod client;
mod errors;
mod query;
mod session;
pub mod types;
pub use self::claims::{decode_identity_claims, Identity};
pub use self::client::{Client, DEPARTMENT_RESOURCE, USER_RESOURCE};
pub use self::errors::Error;
pub use self::query::{ListQuery, Query, SortDirection, DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};
pub use self::session::Session;
pub use reqwest::Method;
