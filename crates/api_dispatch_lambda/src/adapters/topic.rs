use api_dispatch_core::remote::{PublishAck, TopicService};
use api_dispatch_core::RemoteError;

use super::{block_on, remote_error, AwsServices};

impl TopicService for AwsServices {
    fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<PublishAck, RemoteError> {
        let output = block_on(async {
            self.sns
                .publish()
                .topic_arn(topic)
                .subject(subject)
                .message(message)
                .send()
                .await
        })
        .map_err(remote_error)?;

        Ok(PublishAck {
            message_id: output.message_id().map(str::to_string),
        })
    }
}
