//! Typed errors for the event pass lookup.
//!
//! Remote lookups fail with a closed set of conditions ([`FetchError`]) that
//! the resolver switches on exhaustively. Transport-level problems in the
//! HTTP adapter are expressed as [`ClientError`] and folded into
//! [`FetchError::Other`] before they reach the resolver.

use reqwest::StatusCode;
use thiserror::Error;

/// Classified failure of an event or pass lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The lookup was refused (HTTP 403). For an event this means pass
    /// issuance is closed to the viewer.
    #[error("forbidden")]
    Forbidden,

    /// The event does not exist (HTTP 404)
    #[error("not found")]
    NotFound,

    /// The request was understood but cannot be served (HTTP 422).
    /// For a pass this means no more passes are available.
    #[error("unprocessable")]
    Unprocessable,

    /// Anything else, carrying a human-readable description
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Classify a non-success HTTP response.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::FORBIDDEN => FetchError::Forbidden,
            StatusCode::NOT_FOUND => FetchError::NotFound,
            StatusCode::UNPROCESSABLE_ENTITY => FetchError::Unprocessable,
            other => FetchError::Other(format!(
                "Request failed with status code {}",
                other.as_u16()
            )),
        }
    }

    /// Free-form failure with the given description.
    pub fn other(message: impl Into<String>) -> Self {
        FetchError::Other(message.into())
    }
}

/// Errors raised by the HTTP adapter before classification.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(StatusCode),

    #[error("Invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<ClientError> for FetchError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status(status) => FetchError::from_status(status),
            other => FetchError::Other(other.to_string()),
        }
    }
}

/// Result type alias for lookups.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
