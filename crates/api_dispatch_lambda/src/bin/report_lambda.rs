use api_dispatch_lambda::adapters::AwsServices;
use api_dispatch_lambda::config::{require, ApiConfig, REPORT_LOG_GROUP_VAR};
use api_dispatch_lambda::handlers::report::handle_report_event;
use api_dispatch_lambda::telemetry;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<String, Error> {
    let config = ApiConfig::from_env();
    let log_group = require(&config.report_log_group, REPORT_LOG_GROUP_VAR)
        .map_err(|error| Error::from(error.to_string()))?;
    let services = AwsServices::from_env().await;

    handle_report_event(&event.payload, log_group, &services)
        .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init_tracing();
    lambda_runtime::run(service_fn(handle_request)).await
}
