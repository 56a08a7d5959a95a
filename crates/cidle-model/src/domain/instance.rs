use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier of a compute instance, assigned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for InstanceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstanceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a compute instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Pending,
    Running,
    Stopping,
    Stopped,
}

/// Snapshot of a compute instance as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: InstanceId,
    pub state: InstanceState,
    /// Provider tags; the locator matches on the `Name` tag.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Instance {
    /// Value of the `Name` tag, if the instance carries one.
    pub fn name_tag(&self) -> Option<&str> {
        self.tags.get("Name").map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(id: &str, name: &str) -> Instance {
        Instance {
            id: InstanceId::from(id),
            state: InstanceState::Stopped,
            tags: HashMap::from([("Name".to_string(), name.to_string())]),
        }
    }

    #[test]
    fn name_tag_lookup() {
        let inst = tagged("i-0ab1", "ci-host");
        assert_eq!(inst.name_tag(), Some("ci-host"));

        let untagged = Instance {
            id: InstanceId::from("i-0ab2"),
            state: InstanceState::Running,
            tags: HashMap::new(),
        };
        assert!(untagged.name_tag().is_none());
    }

    #[test]
    fn state_serde_is_lowercase() {
        let json = serde_json::to_string(&InstanceState::Stopping).unwrap();
        assert_eq!(json, r#""stopping""#);
    }
}
