use std::sync::Arc;

use tracing::debug;

use cidle_cloud::InstanceApi;
use cidle_model::{InstanceId, InstanceState};

use crate::error::OrchestratorError;

/// Finds the compute instance tagged as the CI host.
pub struct InstanceLocator {
    instances: Arc<dyn InstanceApi>,
    name_tag: String,
}

impl InstanceLocator {
    pub fn new(instances: Arc<dyn InstanceApi>, name_tag: impl Into<String>) -> Self {
        Self {
            instances,
            name_tag: name_tag.into(),
        }
    }

    /// Return the id of the tagged instance currently in `state`.
    ///
    /// The full describe result is scanned, wherever the match sits in it.
    pub async fn find(&self, state: InstanceState) -> Result<InstanceId, OrchestratorError> {
        let candidates = self.instances.describe_instances(state).await?;
        debug!(
            count = candidates.len(),
            ?state,
            "scanning instances for Name={}",
            self.name_tag
        );

        candidates
            .into_iter()
            .find(|i| i.name_tag() == Some(self.name_tag.as_str()))
            .map(|i| i.id)
            .ok_or_else(|| OrchestratorError::InstanceNotFound {
                tag: self.name_tag.clone(),
                state,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cidle_cloud::CloudError;
    use cidle_model::Instance;
    use std::collections::HashMap;

    /// Returns a fixed describe result in a fixed order.
    struct ScriptedInstances(Vec<Instance>);

    #[async_trait]
    impl InstanceApi for ScriptedInstances {
        async fn describe_instances(
            &self,
            state: InstanceState,
        ) -> Result<Vec<Instance>, CloudError> {
            Ok(self.0.iter().filter(|i| i.state == state).cloned().collect())
        }

        async fn describe_instance(
            &self,
            id: &InstanceId,
        ) -> Result<Option<Instance>, CloudError> {
            Ok(self.0.iter().find(|i| &i.id == id).cloned())
        }

        async fn start_instance(&self, _id: &InstanceId) -> Result<(), CloudError> {
            Ok(())
        }

        async fn stop_instance(&self, _id: &InstanceId) -> Result<(), CloudError> {
            Ok(())
        }
    }

    fn stopped(id: &str, name: &str) -> Instance {
        Instance {
            id: InstanceId::from(id),
            state: InstanceState::Stopped,
            tags: HashMap::from([("Name".to_string(), name.to_string())]),
        }
    }

    #[tokio::test]
    async fn finds_match_beyond_first_position() {
        // The tagged instance sits second of three; it must still be found.
        let api = ScriptedInstances(vec![
            stopped("i-01", "bastion"),
            stopped("i-02", "ci-host"),
            stopped("i-03", "build-cache"),
        ]);
        let locator = InstanceLocator::new(Arc::new(api), "ci-host");

        let id = locator.find(InstanceState::Stopped).await.unwrap();
        assert_eq!(id, InstanceId::from("i-02"));
    }

    #[tokio::test]
    async fn ignores_instances_in_other_states() {
        let mut running = stopped("i-01", "ci-host");
        running.state = InstanceState::Running;
        let api = ScriptedInstances(vec![running]);
        let locator = InstanceLocator::new(Arc::new(api), "ci-host");

        let err = locator.find(InstanceState::Stopped).await.unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::InstanceNotFound {
                state: InstanceState::Stopped,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn not_found_names_the_tag() {
        let api = ScriptedInstances(vec![stopped("i-01", "bastion")]);
        let locator = InstanceLocator::new(Arc::new(api), "ci-host");

        let err = locator.find(InstanceState::Stopped).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "no instance tagged Name=ci-host in state Stopped"
        );
    }
}
