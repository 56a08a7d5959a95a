use std::time::Duration;

use cidle_cloud::CloudError;
use cidle_model::{InstanceId, InstanceState};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("no instance tagged Name={tag} in state {state:?}")]
    InstanceNotFound { tag: String, state: InstanceState },

    #[error("instance {id} not running after {waited:?}")]
    ReadinessTimeout { id: InstanceId, waited: Duration },

    #[error(transparent)]
    Cloud(#[from] CloudError),
}
