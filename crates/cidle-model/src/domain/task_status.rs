use serde::{Deserialize, Serialize};

/// Lifecycle state of a task on the cluster orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task has been requested but is not yet executing.
    Pending,
    /// Task is currently executing.
    Running,
    /// Task has ended.
    Stopped,
}

impl TaskStatus {
    /// Returns `true` if the task still occupies cluster capacity.
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_states() {
        assert!(TaskStatus::Pending.is_active());
        assert!(TaskStatus::Running.is_active());
        assert!(!TaskStatus::Stopped.is_active());
    }

    #[test]
    fn serde_uses_orchestrator_casing() {
        let json = serde_json::to_string(&TaskStatus::Running).unwrap();
        assert_eq!(json, r#""RUNNING""#);

        let back: TaskStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TaskStatus::Running);
    }
}
