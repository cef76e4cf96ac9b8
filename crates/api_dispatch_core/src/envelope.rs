use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::failure::{Failure, StatusCode};

pub const GENERIC_ERROR_MESSAGE: &str = "internal error";

/// Body of every response that crosses the transport boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeBody {
    Payload(Value),
    Error(String),
}

/// Uniform result carrier: exactly one of payload or error, plus a status.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    status: StatusCode,
    body: EnvelopeBody,
}

impl ResponseEnvelope {
    pub fn success(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: EnvelopeBody::Payload(value),
        }
    }

    /// Wraps an expected failure. A `Fault` handed in here is still masked.
    pub fn failure(failure: &Failure) -> Self {
        match failure {
            Failure::Expected { message, status } => Self {
                status: *status,
                body: EnvelopeBody::Error(message.clone()),
            },
            Failure::Fault(detail) => Self::failure_unexpected(detail),
        }
    }

    /// Generic 500. The detail is logged here and goes no further.
    pub fn failure_unexpected(detail: &str) -> Self {
        tracing::error!(detail, "unexpected fault");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: EnvelopeBody::Error(GENERIC_ERROR_MESSAGE.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &EnvelopeBody {
        &self.body
    }

    pub fn payload(&self) -> Option<&Value> {
        match &self.body {
            EnvelopeBody::Payload(value) => Some(value),
            EnvelopeBody::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.body {
            EnvelopeBody::Payload(_) => None,
            EnvelopeBody::Error(message) => Some(message),
        }
    }

    pub fn into_api_gateway_response(self) -> ApiGatewayResponse {
        let body = serde_json::to_string(&self.body).unwrap_or_else(|error| {
            tracing::error!(%error, "failed to serialize response envelope");
            json!({ "error": GENERIC_ERROR_MESSAGE }).to_string()
        });
        ApiGatewayResponse {
            status_code: self.status.as_u16(),
            headers: json!({"Content-Type": "application/json"}),
            body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}
