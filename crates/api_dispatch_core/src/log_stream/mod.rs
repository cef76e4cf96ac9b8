//! Append-only, sequence-token ordered log streams.
//!
//! Log groups and streams are provisioned elsewhere and referenced by name.

mod token;
mod writer;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::failure::{Failure, RemoteError};

pub use token::{is_conflict, sequence_token_from_message, CONFLICT_ERROR_CODES};
pub use writer::{append, LogWriter, MAX_CONFLICT_RETRIES};

/// A single record appended to a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp_ms: i64,
    pub message: String,
}

/// A record as returned when reading a stream back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamEvent {
    pub timestamp: Option<i64>,
    pub message: Option<String>,
    pub ingestion_time: Option<i64>,
}

/// Remote append-only log service.
pub trait LogService {
    /// Appends one record. `sequence_token` is omitted for the first write
    /// and for streams that do not require one.
    fn put_log_event(
        &self,
        log_group: &str,
        log_stream: &str,
        record: &LogRecord,
        sequence_token: Option<&str>,
    ) -> Result<(), RemoteError>;

    fn get_log_events(&self, log_group: &str, log_stream: &str)
        -> Result<Vec<StreamEvent>, RemoteError>;

    fn describe_log_streams(&self, log_group: &str) -> Result<Vec<String>, RemoteError>;
}

/// Returns the stream's events in the order the store returned them.
pub fn read_log_stream(
    service: &impl LogService,
    log_group: &str,
    log_stream: &str,
) -> Result<Vec<StreamEvent>, Failure> {
    tracing::debug!(log_group, log_stream, "reading log stream");
    Ok(service.get_log_events(log_group, log_stream)?)
}

/// Reads every stream of `log_group`. The first failing stream aborts the read.
pub fn read_all_log_streams(
    service: &impl LogService,
    log_group: &str,
) -> Result<BTreeMap<String, Vec<StreamEvent>>, Failure> {
    tracing::info!(log_group, "reading all log streams");
    let streams = service.describe_log_streams(log_group)?;

    streams
        .into_iter()
        .map(|stream| {
            let events = read_log_stream(service, log_group, &stream)?;
            Ok::<_, Failure>((stream, events))
        })
        .collect()
}
