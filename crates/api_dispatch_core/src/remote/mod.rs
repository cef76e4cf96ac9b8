//! Single-call helpers for remote collaborators.
//!
//! None of these retry. Each one classifies what it can as a
//! [`Failure::Expected`](crate::Failure) and lets everything else through as a
//! fault.

pub mod invoke;
pub mod notify;
pub mod object_store;
pub mod table;
pub mod task;

pub use invoke::{invoke_compute, ComputeService, InvokeMode, InvokeOutput};
pub use notify::{publish_notification, PublishAck, TopicService};
pub use object_store::{get_object, put_object, ObjectService, PutObjectReceipt};
pub use table::{scan_table, ScanOutput, TableItem, TableService, TableValue};
pub use task::{
    run_task, ContainerOverride, TaskLaunch, TaskLaunchDescriptor, TaskLauncher, TaskOverrides,
};
