use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use cidle_core::{Orchestrator, SignatureValidator};

use crate::{error::ApiError, handler::HookHandler};

/// Bridges the request validator and [`Orchestrator`] to [`HookHandler`].
pub struct OrchestratorAdapter {
    validator: SignatureValidator,
    orchestrator: Arc<Orchestrator>,
}

impl OrchestratorAdapter {
    pub fn new(validator: SignatureValidator, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            validator,
            orchestrator,
        }
    }
}

#[async_trait]
impl HookHandler for OrchestratorAdapter {
    async fn start(&self, body: &[u8], signature: Option<&str>) -> Result<(), ApiError> {
        info!(body_len = body.len(), "webhook start request received");
        self.validator.verify(body, signature).await?;
        self.orchestrator.start().await?;
        Ok(())
    }

    async fn stop(&self) -> Result<(), ApiError> {
        info!("scheduled stop request received");
        self.orchestrator.stop().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cidle_cloud::MemoryCloud;
    use cidle_core::{OrchestratorConfig, OrchestratorError, SystemClock};
    use cidle_model::{Instance, InstanceId, InstanceState};
    use std::collections::HashMap;
    use std::time::Duration;

    const BODY: &[u8] = b"The quick brown fox jumps over the lazy dog";
    // HMAC-SHA1 of BODY under the key "key".
    const GOOD: &str = "sha1=de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9";

    fn adapter(cloud: &MemoryCloud) -> OrchestratorAdapter {
        cloud.insert_secret("github/webhook-secret", "key");
        cloud.insert_instance(Instance {
            id: InstanceId::from("i-ci"),
            state: InstanceState::Stopped,
            tags: HashMap::from([("Name".to_string(), "ci-host".to_string())]),
        });

        let config = OrchestratorConfig {
            readiness_poll_interval: Duration::from_millis(1),
            readiness_timeout: Duration::from_millis(250),
            ..OrchestratorConfig::default()
        };
        let validator = SignatureValidator::new(
            Arc::new(cloud.clone()),
            config.secret_name.clone(),
            config.verify_signatures,
        );
        let orchestrator = Orchestrator::new(
            Arc::new(cloud.clone()),
            Arc::new(cloud.clone()),
            Arc::new(cloud.clone()),
            Arc::new(SystemClock),
            config,
        );
        OrchestratorAdapter::new(validator, Arc::new(orchestrator))
    }

    #[tokio::test]
    async fn valid_signature_starts_the_ci_server() {
        let cloud = MemoryCloud::new();
        let adapter = adapter(&cloud);

        adapter.start(BODY, Some(GOOD)).await.unwrap();

        let calls = cloud.calls();
        assert_eq!(calls.run_task, 1);
        assert_eq!(calls.upsert_rule, 1);
    }

    #[tokio::test]
    async fn bad_signature_never_reaches_the_cluster() {
        let cloud = MemoryCloud::new();
        let adapter = adapter(&cloud);

        let err = adapter.start(BODY, Some("sha1=0000")).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Core(OrchestratorError::Auth(_))
        ));
        let calls = cloud.calls();
        assert_eq!(calls.list_tasks, 0);
        assert_eq!(calls.start_instance, 0);
    }

    #[tokio::test]
    async fn stop_delegates_to_orchestrator() {
        let cloud = MemoryCloud::new();
        let adapter = adapter(&cloud);

        adapter.start(BODY, Some(GOOD)).await.unwrap();
        adapter.stop().await.unwrap();

        let calls = cloud.calls();
        assert_eq!(calls.stop_task, 1);
        assert_eq!(calls.stop_instance, 1);
    }
}
