use api_dispatch_core::remote::{ComputeService, InvokeMode, InvokeOutput};
use api_dispatch_core::RemoteError;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;

use super::{block_on, remote_error, AwsServices};

fn invocation_type(mode: InvokeMode) -> InvocationType {
    match mode {
        InvokeMode::DryRun => InvocationType::DryRun,
        InvokeMode::RequestResponse => InvocationType::RequestResponse,
        InvokeMode::Event => InvocationType::Event,
    }
}

impl ComputeService for AwsServices {
    fn invoke(
        &self,
        name: &str,
        payload: &[u8],
        mode: InvokeMode,
    ) -> Result<InvokeOutput, RemoteError> {
        let output = block_on(async {
            self.lambda
                .invoke()
                .function_name(name)
                .invocation_type(invocation_type(mode))
                .payload(Blob::new(payload.to_vec()))
                .send()
                .await
        })
        .map_err(remote_error)?;

        Ok(InvokeOutput {
            status_code: output.status_code(),
            payload: output.payload().map(|blob| blob.as_ref().to_vec()),
            function_error: output.function_error().map(str::to_string),
        })
    }
}
