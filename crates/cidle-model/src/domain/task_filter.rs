use super::TaskStatus;

/// Filter for listing tasks on the cluster.
///
/// Mirrors the list-tasks call of the cluster API: cluster name, started-by
/// tag and desired status, all mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub cluster: String,
    pub started_by: String,
    pub status: TaskStatus,
}

impl TaskFilter {
    pub fn new(cluster: impl Into<String>, started_by: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            started_by: started_by.into(),
            status: TaskStatus::Running,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_running() {
        let filter = TaskFilter::new("ci-cluster", "cidle");
        assert_eq!(filter.status, TaskStatus::Running);
        assert_eq!(filter.cluster, "ci-cluster");
        assert_eq!(filter.started_by, "cidle");
    }

    #[test]
    fn builder_overrides_status() {
        let filter = TaskFilter::new("ci-cluster", "cidle").with_status(TaskStatus::Stopped);
        assert_eq!(filter.status, TaskStatus::Stopped);
    }
}
