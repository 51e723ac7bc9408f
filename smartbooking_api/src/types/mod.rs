mod meta;
pub use self::meta::{ListBody, ListResult, ODataResponse};

mod user;
pub use self::user::{User, UserForm, UserRole, UserStatus};

mod department;
pub use self::department::{Department, DepartmentForm};

mod auth;
pub use self::auth::{LoginRequest, LoginResponse};

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Numeric record identifier used by every resource.
pub type RecordId = i64;

/// Accepts identifiers sent either as JSON numbers or as numeric strings.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Int(id) => Ok(id),
        RawId::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Parses a backend timestamp, with or without a timezone suffix.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}
