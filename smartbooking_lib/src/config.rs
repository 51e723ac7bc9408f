//! Runtime settings read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TOKEN_FILE: &str = ".smartbooking_token";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Offset of creation stamps unless configured otherwise (UTC+7).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    pub timeout: Duration,
    /// Token to start with, skipping login.
    pub token: Option<String>,
    /// Where a login token is persisted between runs.
    pub token_file: PathBuf,
    /// Offset used when stamping creation times on new departments.
    pub utc_offset_hours: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token: None,
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

impl Settings {
    /// Reads `SMARTBOOKING_*` variables, falling back to defaults for
    /// anything missing or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_url: non_empty("SMARTBOOKING_API_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            timeout: non_empty("SMARTBOOKING_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            token: non_empty("SMARTBOOKING_TOKEN"),
            token_file: non_empty("SMARTBOOKING_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_file),
            utc_offset_hours: non_empty("SMARTBOOKING_UTC_OFFSET_HOURS")
                .and_then(|v| v.trim().parse::<i32>().ok())
                .filter(|h| (-23..=23).contains(h))
                .unwrap_or(defaults.utc_offset_hours),
        }
    }

    pub fn utc_offset(&self) -> FixedOffset {
        offset_hours(self.utc_offset_hours)
    }
}

/// The default creation-stamp offset as a `FixedOffset`.
pub fn default_utc_offset() -> FixedOffset {
    offset_hours(DEFAULT_UTC_OFFSET_HOURS)
}

fn offset_hours(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| Utc.fix())
}
