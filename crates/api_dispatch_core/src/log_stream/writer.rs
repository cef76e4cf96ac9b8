use serde_json::{Map, Value};

use super::token::{is_conflict, sequence_token_from_message};
use super::{LogRecord, LogService};
use crate::failure::Failure;

/// Appends allowed after the first conflict; at most `1 + MAX_CONFLICT_RETRIES` calls.
pub const MAX_CONFLICT_RETRIES: u32 = 3;

/// Writes single records to an ordered stream, recovering the sequence token
/// from conflict errors raised by concurrent writers.
pub struct LogWriter<'a, S> {
    service: &'a S,
    now_ms: fn() -> i64,
}

impl<'a, S: LogService> LogWriter<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            now_ms: || chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn with_clock(service: &'a S, now_ms: fn() -> i64) -> Self {
        Self { service, now_ms }
    }

    pub fn append(
        &self,
        log_group: &str,
        log_stream: &str,
        message: &Map<String, Value>,
    ) -> Result<String, Failure> {
        tracing::debug!(log_group, log_stream, "sending event content to log stream");

        if message.is_empty() {
            return Err(Failure::expected_internal(
                "No content to send to Log Stream, aborting",
            ));
        }
        tracing::debug!(?message, "message content");

        let record = LogRecord {
            timestamp_ms: (self.now_ms)(),
            message: serde_json::to_string(message)?,
        };

        let mut sequence_token: Option<String> = None;
        let mut retries_left = MAX_CONFLICT_RETRIES;

        loop {
            match sequence_token.as_deref() {
                Some(token) => tracing::debug!(token, "appending with sequence token"),
                None => tracing::debug!("appending without sequence token"),
            }

            let error = match self.service.put_log_event(
                log_group,
                log_stream,
                &record,
                sequence_token.as_deref(),
            ) {
                Ok(()) => {
                    return Ok(format!(
                        "Successfully delivered event content to log group {log_group} \
                         stream {log_stream}"
                    ));
                }
                Err(error) => error,
            };

            tracing::warn!(code = %error.code, "log service client error");

            if !is_conflict(&error.code) {
                return Err(Failure::expected_internal(format!(
                    "Unexpected response from log service: {error}"
                )));
            }

            if retries_left == 0 {
                return Err(Failure::expected_internal(format!(
                    "Failed sending event content to log group {log_group} stream {log_stream} \
                     after {MAX_CONFLICT_RETRIES} retrials"
                )));
            }

            let next_token = sequence_token_from_message(&error.message);

            retries_left -= 1;
            tracing::warn!(
                token = next_token.as_deref(),
                retries_left,
                "sequence token conflict, retrying"
            );
            sequence_token = next_token;
        }
    }
}

pub fn append(
    service: &impl LogService,
    log_group: &str,
    log_stream: &str,
    message: &Map<String, Value>,
) -> Result<String, Failure> {
    LogWriter::new(service).append(log_group, log_stream, message)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::failure::{RemoteError, StatusCode};
    use crate::log_stream::testing::ScriptedLogService;

    fn message() -> Map<String, Value> {
        json!({"service": "github", "status": "published"})
            .as_object()
            .cloned()
            .expect("fixture is an object")
    }

    fn invalid_token(token: &str) -> Result<(), RemoteError> {
        Err(RemoteError::new(
            "InvalidSequenceTokenException",
            format!("The given sequenceToken is invalid. The next expected sequenceToken is: {token}"),
        ))
    }

    fn already_accepted(token: &str) -> Result<(), RemoteError> {
        Err(RemoteError::new(
            "DataAlreadyAcceptedException",
            format!(
                "The given batch of log events has already been accepted. \
                 The next batch can be sent with sequenceToken: {token}"
            ),
        ))
    }

    #[test]
    fn first_append_goes_without_token() {
        let service = ScriptedLogService::with_put_responses(vec![Ok(())]);

        let result = LogWriter::with_clock(&service, || 1_700_000_000_000)
            .append("reports", "github", &message())
            .expect("append should succeed");

        assert!(result.contains("reports"));
        assert_eq!(service.tokens_used(), vec![None]);
        let calls = service.put_calls.lock().expect("poisoned mutex");
        assert_eq!(calls[0].0.timestamp_ms, 1_700_000_000_000);
        let stored: Value = serde_json::from_str(&calls[0].0.message).expect("message is json");
        assert_eq!(stored, json!({"service": "github", "status": "published"}));
    }

    #[test]
    fn retry_uses_token_embedded_in_conflict_error() {
        let service = ScriptedLogService::with_put_responses(vec![invalid_token("abc123"), Ok(())]);

        append(&service, "reports", "github", &message()).expect("append should succeed");

        assert_eq!(service.tokens_used(), vec![None, Some("abc123".to_string())]);
    }

    #[test]
    fn fourth_attempt_uses_latest_token() {
        let service = ScriptedLogService::with_put_responses(vec![
            invalid_token("t1"),
            already_accepted("t2"),
            invalid_token("t3"),
            Ok(()),
        ]);

        append(&service, "reports", "github", &message()).expect("append should succeed");

        assert_eq!(
            service.tokens_used(),
            vec![
                None,
                Some("t1".to_string()),
                Some("t2".to_string()),
                Some("t3".to_string()),
            ]
        );
    }

    #[test]
    fn fourth_conflict_exhausts_budget_without_fifth_call() {
        let service = ScriptedLogService::with_put_responses(vec![
            invalid_token("t1"),
            invalid_token("t2"),
            invalid_token("t3"),
            invalid_token("t4"),
            Ok(()),
        ]);

        let error = append(&service, "reports", "github", &message())
            .expect_err("append should exhaust retries");

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.is_expected());
        assert!(error.to_string().contains("3 retrials"));
        assert_eq!(service.tokens_used().len(), 4);
    }

    #[test]
    fn empty_message_fails_without_network_call() {
        let service = ScriptedLogService::default();

        let error =
            append(&service, "reports", "github", &Map::new()).expect_err("empty message fails");

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(service.tokens_used().is_empty());
    }

    #[test]
    fn non_conflict_error_is_fatal_and_keeps_detail() {
        let service = ScriptedLogService::with_put_responses(vec![Err(RemoteError::new(
            "ResourceNotFoundException",
            "The specified log stream does not exist.",
        ))]);

        let error = append(&service, "reports", "github", &message())
            .expect_err("missing stream should fail");

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.to_string().contains("ResourceNotFoundException"));
        assert_eq!(service.tokens_used().len(), 1);
    }

    #[test]
    fn null_token_retries_without_token() {
        let service = ScriptedLogService::with_put_responses(vec![invalid_token("null"), Ok(())]);

        append(&service, "reports", "github", &message()).expect("append should succeed");

        assert_eq!(service.tokens_used(), vec![None, None]);
    }

    #[test]
    fn conflict_with_empty_token_retries_without_token() {
        let service = ScriptedLogService::with_put_responses(vec![invalid_token(""), Ok(())]);

        append(&service, "reports", "github", &message()).expect("append should succeed");

        assert_eq!(service.tokens_used(), vec![None, None]);
    }

    #[test]
    fn conflict_without_colon_retries_without_token() {
        let service = ScriptedLogService::with_put_responses(vec![
            Err(RemoteError::new(
                "DataAlreadyAcceptedException",
                "sequence token rejected",
            )),
            Ok(()),
        ]);

        append(&service, "reports", "github", &message()).expect("append should succeed");

        assert_eq!(service.tokens_used(), vec![None, None]);
    }

    #[test]
    fn tokenless_conflicts_still_spend_the_budget() {
        let service = ScriptedLogService::with_put_responses(vec![
            invalid_token(""),
            invalid_token(""),
            invalid_token(""),
            invalid_token(""),
            Ok(()),
        ]);

        let error = append(&service, "reports", "github", &message())
            .expect_err("append should exhaust retries");

        assert!(error.to_string().contains("3 retrials"));
        assert_eq!(service.tokens_used(), vec![None; 4]);
    }
}
