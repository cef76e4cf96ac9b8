pub mod api;
pub mod publish;
pub mod report;

use api_dispatch_core::{Failure, InvocationContext};
use serde_json::{Map, Value};

pub fn invocation_context(context: &lambda_runtime::Context) -> InvocationContext {
    InvocationContext {
        request_id: context.request_id.clone(),
        function_arn: Some(context.invoked_function_arn.clone()),
        deadline_ms: Some(context.deadline),
    }
}

fn object_payload(value: Option<&Value>, what: &str) -> Result<Map<String, Value>, Failure> {
    value
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| Failure::bad_request(format!("{what} must be a JSON object")))
}
