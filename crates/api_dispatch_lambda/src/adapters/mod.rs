//! AWS SDK implementations of the collaborator ports.
//!
//! The ports are synchronous; each call parks the current worker with
//! `block_in_place` and drives the SDK future on the ambient Tokio runtime, so
//! these adapters must only be used from a multi-threaded runtime.

mod compute;
mod logs;
mod objects;
mod table;
mod tasks;
mod topic;

use std::future::Future;

use api_dispatch_core::RemoteError;
use aws_sdk_cloudwatchlogs::error::{DisplayErrorContext, ProvideErrorMetadata};

/// One client per collaborator, built from a shared SDK configuration.
#[derive(Clone)]
pub struct AwsServices {
    logs: aws_sdk_cloudwatchlogs::Client,
    lambda: aws_sdk_lambda::Client,
    sns: aws_sdk_sns::Client,
    s3: aws_sdk_s3::Client,
    ecs: aws_sdk_ecs::Client,
    dynamodb: aws_sdk_dynamodb::Client,
}

impl AwsServices {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            logs: aws_sdk_cloudwatchlogs::Client::new(config),
            lambda: aws_sdk_lambda::Client::new(config),
            sns: aws_sdk_sns::Client::new(config),
            s3: aws_sdk_s3::Client::new(config),
            ecs: aws_sdk_ecs::Client::new(config),
            dynamodb: aws_sdk_dynamodb::Client::new(config),
        }
    }

    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(&config)
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Keeps the service error code and message; transport failures without a
/// code are reported as `Unknown` with the full error chain as message.
fn remote_error<E>(error: E) -> RemoteError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let code = error.code().unwrap_or("Unknown").to_string();
    let message = error
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&error).to_string());
    RemoteError::new(code, message)
}

fn build_error(error: impl std::fmt::Display) -> RemoteError {
    RemoteError::new("BuildError", error.to_string())
}
