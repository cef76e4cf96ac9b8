use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::failure::{Failure, RemoteError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerOverride {
    pub name: String,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOverrides {
    #[serde(default)]
    pub container_overrides: Vec<ContainerOverride>,
}

impl TaskOverrides {
    pub fn is_empty(&self) -> bool {
        self.container_overrides.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLaunch {
    pub task: String,
    pub cluster: String,
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
    #[serde(default = "default_assign_public_ip")]
    pub assign_public_ip: bool,
    #[serde(default)]
    pub overrides: TaskOverrides,
}

fn default_assign_public_ip() -> bool {
    true
}

impl TaskLaunch {
    pub fn new(
        task: impl Into<String>,
        cluster: impl Into<String>,
        subnets: Vec<String>,
        security_groups: Vec<String>,
    ) -> Self {
        Self {
            task: task.into(),
            cluster: cluster.into(),
            subnets,
            security_groups,
            assign_public_ip: default_assign_public_ip(),
            overrides: TaskOverrides::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLaunchDescriptor {
    pub task_arns: Vec<String>,
    pub failures: Vec<String>,
}

pub trait TaskLauncher {
    fn run_task(&self, launch: &TaskLaunch) -> Result<TaskLaunchDescriptor, RemoteError>;
}

/// Fire-and-forget container task launch.
pub fn run_task(
    launcher: &impl TaskLauncher,
    launch: &TaskLaunch,
) -> Result<TaskLaunchDescriptor, Failure> {
    tracing::info!(task = %launch.task, cluster = %launch.cluster, "triggering task");
    if !launch.overrides.is_empty() {
        tracing::info!(overrides = ?launch.overrides, "setting overrides");
    }

    let descriptor = launcher.run_task(launch)?;
    tracing::debug!(?descriptor, "task launch response");
    Ok(descriptor)
}
