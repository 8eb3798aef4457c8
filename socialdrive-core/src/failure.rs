use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Status classification carried by a failed remote call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    InvalidArgument,
    NotFound,
    FailedPrecondition,
    Unavailable,
    DeadlineExceeded,
    Internal,
    Unknown,
}

impl StatusCode {
    pub fn from_http(status: u16) -> Self {
        match status {
            400 | 422 => StatusCode::InvalidArgument,
            404 => StatusCode::NotFound,
            409 | 412 => StatusCode::FailedPrecondition,
            502 | 503 => StatusCode::Unavailable,
            408 | 504 => StatusCode::DeadlineExceeded,
            500 => StatusCode::Internal,
            _ => StatusCode::Unknown,
        }
    }

    pub fn http_status(self) -> u16 {
        match self {
            StatusCode::InvalidArgument => 400,
            StatusCode::NotFound => 404,
            StatusCode::FailedPrecondition => 412,
            StatusCode::Unavailable => 503,
            StatusCode::DeadlineExceeded => 504,
            StatusCode::Internal | StatusCode::Unknown => 500,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::FailedPrecondition => "FAILED_PRECONDITION",
            StatusCode::Unavailable => "UNAVAILABLE",
            StatusCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            StatusCode::Internal => "INTERNAL",
            StatusCode::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Body of a non-success response from the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: StatusCode,
    pub message: String,
}

/// Why a single remote call did not succeed. Never retried.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Failure {
    /// The call completed with an error status. Timeouts land here as `DeadlineExceeded`.
    #[error("{code}: {detail}")]
    Status { code: StatusCode, detail: String },

    /// The call returned without error, but the expected success marker is missing.
    #[error("response lacks `{expected}`: {response}")]
    Logical {
        expected: &'static str,
        response: String,
    },

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl Failure {
    pub fn status(code: StatusCode, detail: impl Into<String>) -> Self {
        Failure::Status {
            code,
            detail: detail.into(),
        }
    }

    pub fn deadline_exceeded(timeout: std::time::Duration) -> Self {
        Failure::status(
            StatusCode::DeadlineExceeded,
            format!(
                "no response within {}",
                humantime::format_duration(timeout)
            ),
        )
    }

    pub fn code(&self) -> Option<StatusCode> {
        match self {
            Failure::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn class(&self) -> FailureClass {
        match self {
            Failure::Status { .. } => FailureClass::Status,
            Failure::Logical { .. } => FailureClass::Logical,
            Failure::Unexpected(_) => FailureClass::Unexpected,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureClass {
    Status,
    Logical,
    Unexpected,
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureClass::Status => "status",
            FailureClass::Logical => "logical",
            FailureClass::Unexpected => "unexpected",
        })
    }
}
