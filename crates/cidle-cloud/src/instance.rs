use async_trait::async_trait;
use cidle_model::{Instance, InstanceId, InstanceState};

use crate::error::CloudError;

/// Control plane of the compute provider backing the CI host.
#[async_trait]
pub trait InstanceApi: Send + Sync + 'static {
    /// All instances currently in the given lifecycle state.
    async fn describe_instances(&self, state: InstanceState)
    -> Result<Vec<Instance>, CloudError>;

    /// Current snapshot of a single instance, if it exists.
    async fn describe_instance(&self, id: &InstanceId) -> Result<Option<Instance>, CloudError>;

    /// Request a stopped instance be started.
    async fn start_instance(&self, id: &InstanceId) -> Result<(), CloudError>;

    /// Request a running instance be stopped.
    async fn stop_instance(&self, id: &InstanceId) -> Result<(), CloudError>;
}
