use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::failure::Failure;

/// Exact-match lookup key of the form `"VERB PATH"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteKey(String);

impl RouteKey {
    pub fn new(verb: &str, path: &str) -> Self {
        Self(format!("{} {}", verb.trim().to_ascii_uppercase(), path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied invocation metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_arn: Option<String>,
    pub deadline_ms: Option<u64>,
}

/// Inbound request descriptor, immutable once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    verb: String,
    path: String,
    body: Option<String>,
    context: InvocationContext,
}

impl Event {
    pub fn new(
        verb: impl Into<String>,
        path: impl Into<String>,
        body: Option<String>,
        context: InvocationContext,
    ) -> Self {
        Self {
            verb: verb.into(),
            path: path.into(),
            body,
            context,
        }
    }

    /// Normalizes an API Gateway REST (v1) or HTTP API (v2) proxy event.
    pub fn from_api_gateway(event: &Value, context: InvocationContext) -> Result<Self, Failure> {
        let Some(object) = event.as_object() else {
            return Err(Failure::bad_request("Request event must be a JSON object"));
        };

        let verb = object
            .get("httpMethod")
            .and_then(Value::as_str)
            .or_else(|| {
                event
                    .pointer("/requestContext/http/method")
                    .and_then(Value::as_str)
            })
            .ok_or_else(|| Failure::bad_request("Request event is missing the HTTP method"))?;

        let path = object
            .get("path")
            .and_then(Value::as_str)
            .or_else(|| object.get("rawPath").and_then(Value::as_str))
            .ok_or_else(|| Failure::bad_request("Request event is missing the path"))?;

        let base64_encoded = object
            .get("isBase64Encoded")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let body = match object.get("body") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if base64_encoded => Some(decode_base64_body(text)?),
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        };

        Ok(Self::new(verb, path, body, context))
    }

    pub fn route_key(&self) -> RouteKey {
        RouteKey::new(&self.verb, &self.path)
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn context(&self) -> &InvocationContext {
        &self.context
    }
}

fn decode_base64_body(text: &str) -> Result<String, Failure> {
    let bytes = BASE64
        .decode(text)
        .map_err(|error| Failure::bad_request(format!("Malformed base64 body: {error}")))?;
    String::from_utf8(bytes)
        .map_err(|error| Failure::bad_request(format!("Request body is not UTF-8: {error}")))
}
