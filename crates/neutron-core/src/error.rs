//! Error types for networking API operations.
//!
//! Every failure a binding can report is one of three kinds: a validation
//! failure caught before any request is sent, a transport failure reported by
//! the shared [`ServiceClient`](crate::client::ServiceClient), or a decode
//! failure raised when a deferred result is extracted.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for networking API operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Request options failed validation before anything was sent
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Service is unavailable (connection refused, 5xx)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request rejected by the service
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Authentication or authorization failure
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The service answered with a status the operation does not accept
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// Status code returned by the service
        status: u16,
        /// Response body, lossily decoded
        body: String,
    },

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    DecodeError(String),
}

/// Specialized result type for networking API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Raised before any network call; the caller must fix its options.
    Validation,
    /// Raised by the HTTP layer: network failure, unexpected status, setup.
    Transport,
    /// Raised while decoding a response body.
    Decode,
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Conflict(_) => "CONFLICT",
            Self::UnexpectedStatus { .. } => "UNEXPECTED_STATUS",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::DecodeError(_) => "DECODE_ERROR",
        }
    }

    /// Returns the kind of failure this error represents.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError(_) => ErrorKind::Validation,
            Self::DecodeError(_) => ErrorKind::Decode,
            _ => ErrorKind::Transport,
        }
    }

    /// Returns true if the error was raised before any request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation)
    }

    /// Map an unexpected HTTP status and its body to an error.
    #[must_use]
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::BAD_REQUEST => Self::BadRequest(body),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(body),
            StatusCode::CONFLICT => Self::Conflict(body),
            StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                Self::ServiceUnavailable(format!("temporarily unavailable ({status}): {body}"))
            }
            status if status.is_server_error() => {
                Self::ServiceUnavailable(format!("server error {status}: {body}"))
            }
            status => Self::UnexpectedStatus {
                status: status.as_u16(),
                body,
            },
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_builder() {
            Self::InvalidEndpoint(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
