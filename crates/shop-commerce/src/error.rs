//! Commerce error types.

use thiserror::Error;

/// Errors raised by client-side commerce rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A required field was empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field failed a form rule.
    #[error("Validation error: {field}: {reason}")]
    ValidationError { field: &'static str, reason: String },

    /// Unknown order status.
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CommerceError::ValidationError {
            field,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
