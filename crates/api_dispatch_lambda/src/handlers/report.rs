//! Audit records for completed social publications.
//!
//! Each publisher function reports through an on-success destination; the
//! record's `responsePayload` lands in the report log group, one stream per
//! publisher.

use api_dispatch_core::log_stream::{append, LogService};
use api_dispatch_core::Failure;
use serde_json::Value;

use super::object_payload;

pub fn handle_report_event(
    event: &Value,
    log_group: &str,
    logs: &impl LogService,
) -> Result<String, Failure> {
    let report = object_payload(event.get("responsePayload"), "responsePayload")?;

    let log_stream = match report.get("service").and_then(Value::as_str) {
        Some(service) if !service.trim().is_empty() => service.to_string(),
        _ => {
            return Err(Failure::bad_request(
                "responsePayload.service must name the reporting publisher",
            ));
        }
    };

    tracing::info!(log_group, log_stream, "storing publication report");
    append(logs, log_group, &log_stream, &report)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use api_dispatch_core::log_stream::{LogRecord, StreamEvent};
    use api_dispatch_core::{RemoteError, StatusCode};
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct CapturingLogs {
        appended: Mutex<Vec<(String, String, String)>>,
    }

    impl LogService for CapturingLogs {
        fn put_log_event(
            &self,
            log_group: &str,
            log_stream: &str,
            record: &LogRecord,
            _sequence_token: Option<&str>,
        ) -> Result<(), RemoteError> {
            self.appended.lock().expect("poisoned mutex").push((
                log_group.to_string(),
                log_stream.to_string(),
                record.message.clone(),
            ));
            Ok(())
        }

        fn get_log_events(
            &self,
            _log_group: &str,
            _log_stream: &str,
        ) -> Result<Vec<StreamEvent>, RemoteError> {
            Ok(Vec::new())
        }

        fn describe_log_streams(&self, _log_group: &str) -> Result<Vec<String>, RemoteError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn appends_response_payload_to_service_stream() {
        let logs = CapturingLogs::default();
        let event = json!({
            "version": "1.0",
            "requestContext": {"condition": "Success"},
            "requestPayload": {"Records": []},
            "responsePayload": {"service": "github", "url": "https://example.com/post"},
        });

        handle_report_event(&event, "publish-to-social-reports", &logs)
            .expect("report should be stored");

        let appended = logs.appended.lock().expect("poisoned mutex");
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].0, "publish-to-social-reports");
        assert_eq!(appended[0].1, "github");
        let stored: Value = serde_json::from_str(&appended[0].2).expect("record is json");
        assert_eq!(
            stored,
            json!({"service": "github", "url": "https://example.com/post"})
        );
    }

    #[test]
    fn rejects_report_without_service() {
        let logs = CapturingLogs::default();

        let error = handle_report_event(
            &json!({"responsePayload": {"url": "https://example.com"}}),
            "reports",
            &logs,
        )
        .expect_err("report without service should fail");

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(logs.appended.lock().expect("poisoned mutex").is_empty());
    }

    #[test]
    fn rejects_non_object_response_payload() {
        let logs = CapturingLogs::default();

        let error = handle_report_event(&json!({"responsePayload": "done"}), "reports", &logs)
            .expect_err("string payload should fail");

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }
}
