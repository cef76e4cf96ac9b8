use serde_json::Value;

use crate::failure::{Failure, RemoteError};
use crate::fatal;

/// Acknowledgment returned by the topic service for one publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishAck {
    pub message_id: Option<String>,
}

pub trait TopicService {
    fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<PublishAck, RemoteError>;
}

/// Publishes `content` as JSON and returns the message identifier.
///
/// An acknowledgment without a message identifier leaves delivery state
/// unverifiable, so the process is terminated instead of returning.
pub fn publish_notification(
    service: &impl TopicService,
    topic: &str,
    subject: &str,
    content: &Value,
) -> Result<String, Failure> {
    tracing::info!(subject, topic, "sending message to topic");
    tracing::debug!(%content, "message");

    let message = serde_json::to_string(content)?;
    let ack = service.publish(topic, subject, &message)?;

    match ack.message_id {
        Some(message_id) => Ok(message_id),
        None => fatal::terminate("Missing MessageId in topic publish response"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    struct CapturingTopic {
        published: Mutex<Vec<(String, String, String)>>,
        result: Result<PublishAck, RemoteError>,
    }

    impl TopicService for CapturingTopic {
        fn publish(
            &self,
            topic: &str,
            subject: &str,
            message: &str,
        ) -> Result<PublishAck, RemoteError> {
            self.published.lock().expect("poisoned mutex").push((
                topic.to_string(),
                subject.to_string(),
                message.to_string(),
            ));
            self.result.clone()
        }
    }

    #[test]
    fn returns_message_id_from_ack() {
        let service = CapturingTopic {
            published: Mutex::new(Vec::new()),
            result: Ok(PublishAck {
                message_id: Some("msg-1".to_string()),
            }),
        };

        let id = publish_notification(&service, "arn:topic", "New post", &json!({"url": "u"}))
            .expect("publish should succeed");

        assert_eq!(id, "msg-1");
        let published = service.published.lock().expect("poisoned mutex");
        assert_eq!(
            published[0],
            (
                "arn:topic".to_string(),
                "New post".to_string(),
                "{\"url\":\"u\"}".to_string()
            )
        );
    }

    #[test]
    fn remote_error_is_a_fault() {
        let service = CapturingTopic {
            published: Mutex::new(Vec::new()),
            result: Err(RemoteError::new("AuthorizationError", "denied")),
        };

        let error = publish_notification(&service, "arn:topic", "s", &json!({}))
            .expect_err("publish should fail");

        assert!(!error.is_expected());
    }
}
