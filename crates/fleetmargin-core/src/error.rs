//! Error types for Fleetmargin

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied value violates a stated constraint
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A required configuration constant is missing or out of range
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A computation has no defined result for its inputs (e.g. division by zero)
    #[error("Arithmetic ambiguity: {0}")]
    ArithmeticAmbiguity(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(quantity: &str) -> Self {
        Self::ArithmeticAmbiguity(format!(
            "{} exceeds the representable decimal range",
            quantity
        ))
    }

    /// Name of the offending input field, for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
