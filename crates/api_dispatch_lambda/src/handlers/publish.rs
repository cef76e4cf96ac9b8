use api_dispatch_core::remote::{publish_notification, TopicService};
use api_dispatch_core::Failure;
use serde::Deserialize;
use serde_json::{json, Value};

use super::object_payload;

#[derive(Debug, Clone, Deserialize)]
pub struct PublishRequest {
    pub subject: String,
    pub content: Value,
}

/// Fans a publication out to every subscriber of `topic`.
pub fn handle_publish_event(
    event: Value,
    topic: &str,
    topics: &impl TopicService,
) -> Result<Value, Failure> {
    let request: PublishRequest = serde_json::from_value(event)
        .map_err(|error| Failure::bad_request(format!("Malformed publish request: {error}")))?;
    let content = Value::Object(object_payload(Some(&request.content), "content")?);

    let message_id = publish_notification(topics, topic, &request.subject, &content)?;
    Ok(json!({ "message_id": message_id }))
}
