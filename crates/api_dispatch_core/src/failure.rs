use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP-like status code, always within the inclusive range [100, 599].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct StatusCode(u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    pub fn new(code: u16) -> Option<Self> {
        (100..=599).contains(&code).then_some(Self(code))
    }

    /// Maps a status reported by a remote collaborator, falling back to 500
    /// when the value cannot be carried by an envelope.
    pub fn from_remote(code: i64) -> Self {
        u16::try_from(code)
            .ok()
            .and_then(Self::new)
            .unwrap_or(Self::INTERNAL_SERVER_ERROR)
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    pub fn is_success(self) -> bool {
        (200..300).contains(&self.0)
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("status code {value} is outside [100, 599]"))
    }
}

impl From<StatusCode> for u16 {
    fn from(value: StatusCode) -> Self {
        value.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of anything running beneath the router.
///
/// `Expected` failures are classified by the raising code and are safe to echo
/// to the caller. `Fault` carries detail meant for operators only; the router
/// replaces it with a generic message before anything crosses the transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    #[error("{message}")]
    Expected { message: String, status: StatusCode },
    #[error("unexpected fault: {0}")]
    Fault(String),
}

pub type HandlerResult = Result<serde_json::Value, Failure>;

impl Failure {
    pub fn expected(message: impl Into<String>, status: StatusCode) -> Self {
        Self::Expected {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::expected(message, StatusCode::BAD_REQUEST)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::expected(message, StatusCode::NOT_FOUND)
    }

    pub fn expected_internal(message: impl Into<String>) -> Self {
        Self::expected(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn fault(detail: impl fmt::Display) -> Self {
        Self::Fault(detail.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Expected { status, .. } => *status,
            Self::Fault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Expected { .. })
    }
}

impl From<serde_json::Error> for Failure {
    fn from(error: serde_json::Error) -> Self {
        Self::fault(format!("json serialization: {error}"))
    }
}

/// Client-side error reported by a remote collaborator.
///
/// `code` is the service's own error identifier (for example
/// `InvalidSequenceTokenException` or `NoSuchKey`), `message` its free text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct RemoteError {
    pub code: String,
    pub message: String,
}

impl RemoteError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<RemoteError> for Failure {
    fn from(error: RemoteError) -> Self {
        Self::fault(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_rejects_values_outside_http_range() {
        assert!(StatusCode::new(99).is_none());
        assert!(StatusCode::new(600).is_none());
        assert_eq!(StatusCode::new(100).map(StatusCode::as_u16), Some(100));
        assert_eq!(StatusCode::new(599).map(StatusCode::as_u16), Some(599));
    }

    #[test]
    fn remote_status_outside_range_maps_to_internal_error() {
        assert_eq!(StatusCode::from_remote(0), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(StatusCode::from_remote(-1), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(StatusCode::from_remote(70_000), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(StatusCode::from_remote(429).as_u16(), 429);
    }

    #[test]
    fn faults_always_report_internal_status() {
        let fault = Failure::fault("index out of bounds");
        assert_eq!(fault.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!fault.is_expected());

        let expected = Failure::not_found("missing");
        assert_eq!(expected.status(), StatusCode::NOT_FOUND);
        assert_eq!(expected.to_string(), "missing");
    }

    #[test]
    fn expected_internal_is_echoed_tier_with_internal_status() {
        let failure = Failure::expected_internal("empty table");
        assert!(failure.is_expected());
        assert_eq!(failure.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failure.to_string(), "empty table");
    }

    #[test]
    fn only_2xx_counts_as_success() {
        assert!(StatusCode::OK.is_success());
        assert!(StatusCode::from_remote(299).is_success());
        assert!(!StatusCode::from_remote(300).is_success());
        assert!(!StatusCode::from_remote(0).is_success());
    }

    #[test]
    fn remote_errors_become_faults() {
        let failure: Failure = RemoteError::new("AccessDenied", "not allowed").into();
        assert_eq!(failure, Failure::Fault("AccessDenied: not allowed".to_string()));
    }
}
