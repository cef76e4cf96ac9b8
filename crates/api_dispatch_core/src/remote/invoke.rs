use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::failure::{Failure, RemoteError, StatusCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeMode {
    DryRun,
    RequestResponse,
    Event,
}

impl InvokeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DryRun => "DryRun",
            Self::RequestResponse => "RequestResponse",
            Self::Event => "Event",
        }
    }

    /// Synchronous modes return a payload worth decoding.
    pub fn returns_payload(self) -> bool {
        !matches!(self, Self::Event)
    }
}

impl FromStr for InvokeMode {
    type Err = Failure;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "DryRun" => Ok(Self::DryRun),
            "RequestResponse" => Ok(Self::RequestResponse),
            "Event" => Ok(Self::Event),
            other => Err(Failure::bad_request(format!("invalid invoke_type: {other}"))),
        }
    }
}

impl fmt::Display for InvokeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeOutput {
    pub status_code: i32,
    pub payload: Option<Vec<u8>>,
    pub function_error: Option<String>,
}

pub trait ComputeService {
    fn invoke(&self, name: &str, payload: &[u8], mode: InvokeMode)
        -> Result<InvokeOutput, RemoteError>;
}

/// Invokes a remote function. Returns the decoded payload for synchronous
/// modes and `None` for `Event`.
pub fn invoke_compute(
    service: &impl ComputeService,
    name: &str,
    payload: &Value,
    mode: &str,
) -> Result<Option<Value>, Failure> {
    let mode: InvokeMode = mode.parse()?;
    let request = serde_json::to_vec(payload)?;

    tracing::debug!(name, %mode, "invoking compute function");
    let output = service.invoke(name, &request, mode)?;
    tracing::debug!(name, status = output.status_code, "compute invocation returned");

    if let Some(function_error) = output.function_error.as_deref() {
        tracing::warn!(name, function_error, "compute function reported an error");
    }

    let decoded = if mode.returns_payload() {
        let bytes = output.payload.as_deref().unwrap_or_default();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(bytes).map_err(|error| {
                Failure::fault(format!("undecodable payload from {name}: {error}"))
            })?
        };
        Some(value)
    } else {
        None
    };

    let status = StatusCode::from_remote(i64::from(output.status_code));
    if !status.is_success() {
        return Err(Failure::expected(
            format!(
                "compute response from {name}: status {}, payload {}",
                output.status_code,
                decoded.as_ref().unwrap_or(&Value::Null)
            ),
            status,
        ));
    }

    Ok(decoded)
}
