//! Public HTTPS API routes.

use std::sync::Arc;

use api_dispatch_core::log_stream::{read_all_log_streams, LogService};
use api_dispatch_core::remote::{
    invoke_compute, scan_table, ComputeService, TableItem, TableService,
};
use api_dispatch_core::{
    handler_fn, ApiGatewayResponse, Event, Failure, HandlerResult, InvocationContext,
    ResponseEnvelope, Router, StatusCode,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::{
    require, ApiConfig, NOTIFICATIONS_FUNCTION_VAR, PAGESPEED_TABLE_VAR, REPORT_LOG_GROUP_VAR,
};

pub const ROBOTS_TXT: &str = "User-agent: *\nDisallow: /";
pub const CONTACT_NOTIFICATION_TITLE: &str = "New /contact submission received";
const CONTACT_FIELDS: [&str; 4] = ["source", "name", "email", "description"];

pub struct ApiDependencies<S> {
    pub config: ApiConfig,
    pub services: S,
}

pub fn build_router<S>(deps: Arc<ApiDependencies<S>>) -> Router
where
    S: ComputeService + LogService + TableService + Send + Sync + 'static,
{
    let contact_deps = Arc::clone(&deps);
    let social_deps = Arc::clone(&deps);
    let pagespeed_deps = deps;

    Router::new("api")
        .route("GET", "/robots.txt", handler_fn(|_| Ok(json!(ROBOTS_TXT))))
        .route(
            "POST",
            "/contact",
            handler_fn(move |event| contact(event, &contact_deps.config, &contact_deps.services)),
        )
        .route(
            "GET",
            "/social_report",
            handler_fn(move |_| social_report(&social_deps.config, &social_deps.services)),
        )
        .route(
            "GET",
            "/pagespeed_report",
            handler_fn(move |_| {
                pagespeed_report(&pagespeed_deps.config, &pagespeed_deps.services)
            }),
        )
}

/// Normalizes the raw proxy event and dispatches it through `router`.
pub fn handle_api_event(
    router: &Router,
    event: &Value,
    context: InvocationContext,
) -> ApiGatewayResponse {
    let envelope = match Event::from_api_gateway(event, context) {
        Ok(event) => router.dispatch(&event),
        Err(failure) => ResponseEnvelope::failure(&failure),
    };
    envelope.into_api_gateway_response()
}

/// Forwards a contact form submission to the notifications function.
pub fn contact(event: &Event, config: &ApiConfig, compute: &impl ComputeService) -> HandlerResult {
    let notifications_function =
        require(&config.notifications_function, NOTIFICATIONS_FUNCTION_VAR)?;

    let body = event.body().unwrap_or_default();
    tracing::debug!(body, "processing contact body");

    let message = contact_message(body)?;
    tracing::debug!(message = %message, "contact message content");

    let response = invoke_compute(
        compute,
        notifications_function,
        &json!({
            "title": CONTACT_NOTIFICATION_TITLE,
            "payload": message,
        }),
        "RequestResponse",
    )?;

    Ok(Value::String(response_text(response)))
}

fn contact_message(body: &str) -> Result<String, Failure> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|error| Failure::bad_request(format!("JSON body is malformatted: {error}")))?;
    let Some(fields) = parsed.as_object() else {
        return Err(Failure::bad_request(
            "JSON body is malformatted: expected a JSON object",
        ));
    };

    let mut values = Vec::with_capacity(CONTACT_FIELDS.len());
    for key in CONTACT_FIELDS {
        let value = fields
            .get(key)
            .ok_or_else(|| Failure::bad_request(format!("Missing JSON key: '{key}'")))?;
        values.push(display_value(value));
    }

    Ok(format!(
        "Source: {}\nName: {}\nMail: {}\nDesc: {}\n",
        values[0], values[1], values[2], values[3]
    ))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn response_text(response: Option<Value>) -> String {
    match response {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Every event of every stream in the report log group.
pub fn social_report(config: &ApiConfig, logs: &impl LogService) -> HandlerResult {
    let log_group = require(&config.report_log_group, REPORT_LOG_GROUP_VAR)?;
    let streams = read_all_log_streams(logs, log_group)?;
    Ok(serde_json::to_value(streams)?)
}

/// One scanned page speed row. When any score is out of range the list is
/// returned as the error message, so the wire body carries it JSON-encoded
/// inside the `error` string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagespeedItem {
    pub url: String,
    pub latest_score_value: f64,
    pub latest_score_timestamp: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

/// Latest stored page speed scores; any score outside (0.99, 1] fails the
/// request with the full item list as message.
pub fn pagespeed_report(config: &ApiConfig, table: &impl TableService) -> HandlerResult {
    let table_name = require(&config.pagespeed_table, PAGESPEED_TABLE_VAR)?;
    let data = scan_table(table, table_name)?;

    if data.count == 0 {
        return Err(Failure::expected(
            "Unexpected DynamoDB response: empty table",
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }

    let mut items = data
        .items
        .iter()
        .map(pagespeed_item)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(?items, "pagespeed items");

    let mut errors = false;
    for item in &mut items {
        if !(0.99 < item.latest_score_value && item.latest_score_value <= 1.0) {
            item.error = true;
            errors = true;
        }
    }

    if errors {
        return Err(Failure::bad_request(serde_json::to_string(&items)?));
    }

    Ok(serde_json::to_value(items)?)
}

fn pagespeed_item(item: &TableItem) -> Result<PagespeedItem, Failure> {
    let string_attribute = |name: &str| {
        item.get(name)
            .and_then(|value| value.as_s())
            .map(str::to_string)
            .ok_or_else(|| {
                Failure::fault(format!("pagespeed item is missing string attribute {name}"))
            })
    };

    let score = item
        .get("latest_score_value")
        .and_then(|value| value.as_n())
        .ok_or_else(|| Failure::fault("pagespeed item is missing latest_score_value"))?;
    let latest_score_value = score
        .parse::<f64>()
        .map_err(|error| Failure::fault(format!("invalid latest_score_value {score}: {error}")))?;

    Ok(PagespeedItem {
        url: string_attribute("url")?,
        latest_score_value,
        latest_score_timestamp: string_attribute("latest_score_timestamp")?,
        error: false,
    })
}
