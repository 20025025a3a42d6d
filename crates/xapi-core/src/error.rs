//! Error types for xAPI operations.
//!
//! Errors fall into three groups:
//!
//! - request construction failures raised before any I/O ([`Error::InvalidMethod`],
//!   [`Error::InvalidEndpoint`], [`Error::InvalidHeader`], [`Error::ConfigError`]),
//! - status-driven API failures raised after a response was received
//!   ([`Error::AccessDenied`], [`Error::NotFound`], [`Error::Conflict`],
//!   [`Error::UnexpectedStatus`]), each carrying the response body,
//! - transport failures ([`Error::Timeout`], [`Error::ServiceUnavailable`],
//!   [`Error::HttpError`]) which the request handler passes through untouched.

use crate::method::VALID_METHODS;
use thiserror::Error;

/// Main error type for xAPI operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested method is not allowed in an xAPI context
    #[error(
        "\"{0}\" is not a valid HTTP method (expected one of [{valid}]) in this API context.",
        valid = VALID_METHODS
    )]
    InvalidMethod(String),

    /// The endpoint rejected the credentials (401) or the operation (403)
    #[error("Access denied ({status}): {body}")]
    AccessDenied {
        /// Status code returned by the endpoint
        status: u16,
        /// Response body
        body: String,
    },

    /// The requested resource does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request conflicts with the current state of the resource (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The endpoint answered with a status code the caller did not accept
    #[error("Unexpected status code {status}: {body}")]
    UnexpectedStatus {
        /// Status code returned by the endpoint
        status: u16,
        /// Response body
        body: String,
    },

    /// Operation timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The endpoint could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Invalid endpoint or request URI
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Header name or value cannot be sent
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Specialized result type for xAPI operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMethod(_) => "INVALID_METHOD",
            Self::AccessDenied { .. } => "ACCESS_DENIED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::UnexpectedStatus { .. } => "UNEXPECTED_STATUS",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::InvalidHeader(_) => "INVALID_HEADER",
            Self::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    /// Returns the response status code for status-driven failures.
    ///
    /// `NotFound` and `Conflict` report the status they are bound to.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::AccessDenied { status, .. } | Self::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            _ => None,
        }
    }

    /// Returns the response body carried by a status-driven failure.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::AccessDenied { body, .. }
            | Self::UnexpectedStatus { body, .. }
            | Self::NotFound(body)
            | Self::Conflict(body) => Some(body.as_str()),
            _ => None,
        }
    }

    /// Returns true if the endpoint answered but the status was not accepted.
    #[must_use]
    pub const fn is_api_failure(&self) -> bool {
        matches!(
            self,
            Self::AccessDenied { .. }
                | Self::NotFound(_)
                | Self::Conflict(_)
                | Self::UnexpectedStatus { .. }
        )
    }

    /// Returns true if the error was raised by the transport.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::ServiceUnavailable(_) | Self::HttpError(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
