use serde::{Deserialize, Serialize};

/// Opaque identifier of a task instance on the cluster.
///
/// Treated as a plain string; the orchestrator never parses its structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskArn(String);

impl TaskArn {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TaskArn {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskArn {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for TaskArn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
