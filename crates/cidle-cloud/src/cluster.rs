use async_trait::async_trait;
use cidle_model::{RunTaskSpec, TaskArn, TaskFilter};

use crate::error::CloudError;

/// Control plane of the cluster orchestrator that runs the CI task.
#[async_trait]
pub trait ClusterApi: Send + Sync + 'static {
    /// List tasks matching the filter.
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<TaskArn>, CloudError>;

    /// Launch a new task and return its identifier.
    async fn run_task(&self, spec: &RunTaskSpec) -> Result<TaskArn, CloudError>;

    /// Request a running task be stopped.
    async fn stop_task(&self, cluster: &str, task: &TaskArn) -> Result<(), CloudError>;
}
