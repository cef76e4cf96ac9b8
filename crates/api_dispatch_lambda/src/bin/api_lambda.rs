use std::sync::Arc;

use api_dispatch_core::ApiGatewayResponse;
use api_dispatch_lambda::adapters::AwsServices;
use api_dispatch_lambda::config::ApiConfig;
use api_dispatch_lambda::handlers::api::{build_router, handle_api_event, ApiDependencies};
use api_dispatch_lambda::handlers::invocation_context;
use api_dispatch_lambda::telemetry;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    let deps = ApiDependencies {
        config: ApiConfig::from_env(),
        services: AwsServices::from_env().await,
    };
    let router = build_router(Arc::new(deps));

    Ok(handle_api_event(
        &router,
        &event.payload,
        invocation_context(&event.context),
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init_tracing();
    lambda_runtime::run(service_fn(handle_request)).await
}
