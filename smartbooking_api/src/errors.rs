//! Error types for the API client.

/// Errors that can occur when talking to the booking backend.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a response (connection refused, timeout, TLS).
    #[error("Network request failed")]
    Network,
    /// The backend answered with a non-success status. Carries a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body could not be decoded into the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    /// The configured base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// A bearer token could not be decoded into identity claims.
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl Error {
    /// Status code for server errors, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
