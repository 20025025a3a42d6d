//! Classification of rejected response status codes.

use xapi_core::Error;

/// Kind of failure a rejected status code maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 401 or 403
    AccessDenied,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// Any other status the caller did not accept
    Unexpected,
}

const STATUS_FAILURES: [(u16, FailureKind); 4] = [
    (401, FailureKind::AccessDenied),
    (403, FailureKind::AccessDenied),
    (404, FailureKind::NotFound),
    (409, FailureKind::Conflict),
];

impl FailureKind {
    /// Look up the failure kind for a status code that was not accepted.
    #[must_use]
    pub fn for_status(status: u16) -> Self {
        STATUS_FAILURES
            .iter()
            .find(|(code, _)| *code == status)
            .map_or(Self::Unexpected, |(_, kind)| *kind)
    }

    /// Build the error for this kind, carrying the response body.
    #[must_use]
    pub fn into_error(self, status: u16, body: String) -> Error {
        match self {
            Self::AccessDenied => Error::AccessDenied { status, body },
            Self::NotFound => Error::NotFound(body),
            Self::Conflict => Error::Conflict(body),
            Self::Unexpected => Error::UnexpectedStatus { status, body },
        }
    }
}

/// Classify a rejected status code into the matching error.
#[must_use]
pub fn classify(status: u16, body: String) -> Error {
    FailureKind::for_status(status).into_error(status, body)
}
