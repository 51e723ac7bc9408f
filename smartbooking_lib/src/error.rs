//! Error types for the library layer.

use std::fmt;

use crate::validation::FieldErrors;

/// Errors produced by the library layer, wrapping upstream API errors and
/// adding client-side validation failures.
#[derive(Debug)]
pub enum AdminError {
    /// An error from the underlying API client (network or server status).
    Api(smartbooking_api::Error),
    /// A form failed required-field validation. Nothing was sent.
    Validation(FieldErrors),
    /// User-provided input (filter text, flags) failed sanitization.
    InvalidInput(String),
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Validation(errors) => write!(f, "Validation failed: {}", errors),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for AdminError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<smartbooking_api::Error> for AdminError {
    fn from(e: smartbooking_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<FieldErrors> for AdminError {
    fn from(e: FieldErrors) -> Self {
        Self::Validation(e)
    }
}
