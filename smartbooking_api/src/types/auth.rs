use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /Auth/login`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Successful login: a signed claims token and its expiry.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub expiration: String,
}

impl LoginResponse {
    /// Parsed expiration. Naive timestamps are read as UTC.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        super::parse_timestamp(&self.expiration).map(|naive| naive.and_utc())
    }
}
