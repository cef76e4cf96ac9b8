use api_dispatch_core::remote::{TaskLaunch, TaskLaunchDescriptor, TaskLauncher};
use api_dispatch_core::RemoteError;
use aws_sdk_ecs::types::{
    AssignPublicIp, AwsVpcConfiguration, ContainerOverride, KeyValuePair, LaunchType,
    NetworkConfiguration, TaskOverride,
};

use super::{block_on, build_error, remote_error, AwsServices};

fn task_override(launch: &TaskLaunch) -> TaskOverride {
    let container_overrides = launch
        .overrides
        .container_overrides
        .iter()
        .map(|container| {
            let environment = container
                .environment
                .iter()
                .map(|(name, value)| KeyValuePair::builder().name(name).value(value).build())
                .collect();
            ContainerOverride::builder()
                .name(&container.name)
                .set_command((!container.command.is_empty()).then(|| container.command.clone()))
                .set_environment(Some(environment))
                .build()
        })
        .collect();

    TaskOverride::builder()
        .set_container_overrides(Some(container_overrides))
        .build()
}

impl TaskLauncher for AwsServices {
    fn run_task(&self, launch: &TaskLaunch) -> Result<TaskLaunchDescriptor, RemoteError> {
        let vpc = AwsVpcConfiguration::builder()
            .set_subnets(Some(launch.subnets.clone()))
            .set_security_groups(Some(launch.security_groups.clone()))
            .assign_public_ip(if launch.assign_public_ip {
                AssignPublicIp::Enabled
            } else {
                AssignPublicIp::Disabled
            })
            .build()
            .map_err(build_error)?;

        let output = block_on(async {
            self.ecs
                .run_task()
                .cluster(&launch.cluster)
                .task_definition(&launch.task)
                .launch_type(LaunchType::Fargate)
                .network_configuration(
                    NetworkConfiguration::builder()
                        .awsvpc_configuration(vpc)
                        .build(),
                )
                .overrides(task_override(launch))
                .send()
                .await
        })
        .map_err(remote_error)?;

        Ok(TaskLaunchDescriptor {
            task_arns: output
                .tasks()
                .iter()
                .filter_map(|task| task.task_arn().map(str::to_string))
                .collect(),
            failures: output
                .failures()
                .iter()
                .map(|failure| {
                    format!(
                        "{}: {}",
                        failure.arn().unwrap_or("unknown"),
                        failure.reason().unwrap_or("no reason given")
                    )
                })
                .collect(),
        })
    }
}
