use api_dispatch_core::log_stream::{LogRecord, LogService, StreamEvent};
use api_dispatch_core::RemoteError;
use aws_sdk_cloudwatchlogs::types::InputLogEvent;

use super::{block_on, build_error, remote_error, AwsServices};

impl LogService for AwsServices {
    fn put_log_event(
        &self,
        log_group: &str,
        log_stream: &str,
        record: &LogRecord,
        sequence_token: Option<&str>,
    ) -> Result<(), RemoteError> {
        let event = InputLogEvent::builder()
            .timestamp(record.timestamp_ms)
            .message(record.message.as_str())
            .build()
            .map_err(build_error)?;

        block_on(async {
            self.logs
                .put_log_events()
                .log_group_name(log_group)
                .log_stream_name(log_stream)
                .log_events(event)
                .set_sequence_token(sequence_token.map(str::to_string))
                .send()
                .await
        })
        .map(|_| ())
        .map_err(remote_error)
    }

    fn get_log_events(
        &self,
        log_group: &str,
        log_stream: &str,
    ) -> Result<Vec<StreamEvent>, RemoteError> {
        let output = block_on(async {
            self.logs
                .get_log_events()
                .log_group_name(log_group)
                .log_stream_name(log_stream)
                .send()
                .await
        })
        .map_err(remote_error)?;

        Ok(output
            .events()
            .iter()
            .map(|event| StreamEvent {
                timestamp: event.timestamp(),
                message: event.message().map(str::to_string),
                ingestion_time: event.ingestion_time(),
            })
            .collect())
    }

    fn describe_log_streams(&self, log_group: &str) -> Result<Vec<String>, RemoteError> {
        let output = block_on(async {
            self.logs
                .describe_log_streams()
                .log_group_name(log_group)
                .send()
                .await
        })
        .map_err(remote_error)?;

        Ok(output
            .log_streams()
            .iter()
            .filter_map(|stream| stream.log_stream_name().map(str::to_string))
            .collect())
    }
}
