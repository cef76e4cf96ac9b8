use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LOG_LEVEL_VAR;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Installs a JSON-lines subscriber writing one flattened object per event to
/// stdout, which the Lambda runtime forwards to CloudWatch.
pub fn init_tracing() {
    let filter = std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|level| EnvFilter::try_new(level.to_ascii_lowercase()).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false),
        )
        .try_init();
}
