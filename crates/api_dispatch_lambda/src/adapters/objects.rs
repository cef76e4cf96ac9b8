use std::time::Duration;

use api_dispatch_core::remote::{ObjectService, PutObjectReceipt};
use api_dispatch_core::RemoteError;
use aws_sdk_s3::client::Waiters;
use aws_sdk_s3::primitives::ByteStream;

use super::{block_on, remote_error, AwsServices};

/// Same ceiling as the SDK's classic `object_exists` waiter: 20 polls, 5s apart.
const OBJECT_EXISTS_MAX_WAIT: Duration = Duration::from_secs(100);

impl ObjectService for AwsServices {
    fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
    ) -> Result<PutObjectReceipt, RemoteError> {
        let output = block_on(async {
            self.s3
                .put_object()
                .bucket(bucket)
                .key(key)
                .body(ByteStream::from(body.to_vec()))
                .send()
                .await
        })
        .map_err(remote_error)?;

        Ok(PutObjectReceipt {
            e_tag: output.e_tag().map(str::to_string),
            version_id: output.version_id().map(str::to_string),
        })
    }

    fn wait_until_exists(&self, bucket: &str, key: &str) -> Result<(), RemoteError> {
        block_on(async {
            self.s3
                .wait_until_object_exists()
                .bucket(bucket)
                .key(key)
                .wait(OBJECT_EXISTS_MAX_WAIT)
                .await
        })
        .map(|_| ())
        .map_err(|error| RemoteError::new("WaiterError", error.to_string()))
    }

    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RemoteError> {
        block_on(async {
            let output = self
                .s3
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(remote_error)?;
            let body = output
                .body
                .collect()
                .await
                .map_err(|error| RemoteError::new("ByteStreamError", error.to_string()))?;
            Ok::<_, RemoteError>(body.into_bytes().to_vec())
        })
    }
}
