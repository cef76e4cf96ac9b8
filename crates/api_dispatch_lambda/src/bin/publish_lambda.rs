use api_dispatch_lambda::adapters::AwsServices;
use api_dispatch_lambda::config::{require, ApiConfig, TOPIC_VAR};
use api_dispatch_lambda::handlers::publish::handle_publish_event;
use api_dispatch_lambda::telemetry;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = ApiConfig::from_env();
    let topic = require(&config.topic, TOPIC_VAR).map_err(|error| Error::from(error.to_string()))?;
    let services = AwsServices::from_env().await;

    handle_publish_event(event.payload, topic, &services)
        .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init_tracing();
    lambda_runtime::run(service_fn(handle_request)).await
}
