//! API client error types.

use shop_commerce::CommerceError;
use shop_data::FetchError;
use thiserror::Error;

/// Errors returned by the API services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request failed or the server answered with an error.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The payload was rejected before anything was sent.
    #[error("Invalid input: {0}")]
    Invalid(#[from] CommerceError),

    /// The client configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Message suitable for a user-facing notice, when there is a specific one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Fetch(err) => err.server_message(),
            _ => None,
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Fetch(err) => err.status(),
            _ => None,
        }
    }

    /// Whether the server reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
