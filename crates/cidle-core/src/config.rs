use std::time::Duration;

/// Fixed identities and tuning knobs for the orchestrator.
///
/// Defaults carry the deployment's well-known names; the daemon overrides
/// them from the environment.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Cluster the CI task runs on.
    pub cluster: String,
    /// Task definition to launch.
    pub task_definition: String,
    /// Placement backend for new tasks.
    pub launch_type: String,
    /// Started-by tag marking tasks owned by this automation.
    pub started_by: String,
    /// `Name` tag of the compute instance backing the CI host.
    pub instance_name_tag: String,
    /// Name of the stop schedule rule (upserted, never appended).
    pub rule_name: String,
    /// How long after a start the stop schedule fires.
    pub stop_after: time::Duration,
    /// Interval between instance readiness polls.
    pub readiness_poll_interval: Duration,
    /// Upper bound on the readiness wait before failing fast.
    pub readiness_timeout: Duration,
    /// Whether inbound webhook signatures are verified. Default on.
    pub verify_signatures: bool,
    /// Parameter store name of the webhook shared secret.
    pub secret_name: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            cluster: "ci-cluster".to_string(),
            task_definition: "ci-server".to_string(),
            launch_type: "EC2".to_string(),
            started_by: "cidle".to_string(),
            instance_name_tag: "ci-host".to_string(),
            rule_name: "cidle-stop".to_string(),
            stop_after: time::Duration::hours(1),
            readiness_poll_interval: Duration::from_secs(5),
            readiness_timeout: Duration::from_secs(180),
            verify_signatures: true,
            secret_name: "github/webhook-secret".to_string(),
        }
    }
}
