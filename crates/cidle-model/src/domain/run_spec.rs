use serde::{Deserialize, Serialize};

/// Parameters for launching a new task on the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTaskSpec {
    /// Cluster to place the task on.
    pub cluster: String,
    /// Registered task definition to instantiate.
    pub task_definition: String,
    /// Number of task copies to launch.
    pub count: u32,
    /// Placement backend (e.g. `"EC2"`).
    pub launch_type: String,
    /// Ownership tag distinguishing tasks launched by this automation.
    pub started_by: String,
}

impl RunTaskSpec {
    /// Single-copy spec, the only shape this automation ever launches.
    pub fn single(
        cluster: impl Into<String>,
        task_definition: impl Into<String>,
        launch_type: impl Into<String>,
        started_by: impl Into<String>,
    ) -> Self {
        Self {
            cluster: cluster.into(),
            task_definition: task_definition.into(),
            count: 1,
            launch_type: launch_type.into(),
            started_by: started_by.into(),
        }
    }
}
