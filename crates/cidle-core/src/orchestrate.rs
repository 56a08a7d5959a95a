use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use cidle_cloud::{ClusterApi, InstanceApi, ScheduleApi};
use cidle_model::{InstanceId, InstanceState, RunTaskSpec, TaskFilter};

use crate::{
    clock::Clock,
    config::OrchestratorConfig,
    error::OrchestratorError,
    locate::InstanceLocator,
    schedule::StopScheduler,
};

/// Start/stop orchestration for the CI task and its backing instance.
///
/// Both paths are idempotent against current cluster state: start skips
/// provisioning when a task is already running, stop no-ops when nothing is.
/// A process-local mutex serializes overlapping invocations; concurrent
/// invocations across deployments can still race the check-then-act window.
pub struct Orchestrator {
    cluster: Arc<dyn ClusterApi>,
    instances: Arc<dyn InstanceApi>,
    locator: InstanceLocator,
    scheduler: StopScheduler,
    config: OrchestratorConfig,
    gate: Mutex<()>,
}

impl Orchestrator {
    pub fn new(
        cluster: Arc<dyn ClusterApi>,
        instances: Arc<dyn InstanceApi>,
        schedule: Arc<dyn ScheduleApi>,
        clock: Arc<dyn Clock>,
        config: OrchestratorConfig,
    ) -> Self {
        let locator = InstanceLocator::new(Arc::clone(&instances), config.instance_name_tag.clone());
        let scheduler = StopScheduler::new(schedule, clock, config.rule_name.clone(), config.stop_after);
        Self {
            cluster,
            instances,
            locator,
            scheduler,
            config,
            gate: Mutex::new(()),
        }
    }

    /// Bring the CI server up if it is not already running, then arm the stop
    /// schedule.
    ///
    /// A provisioning failure aborts before the schedule is touched, so a
    /// broken start never arms a stop against nothing.
    #[instrument(level = "info", skip(self))]
    pub async fn start(&self) -> Result<(), OrchestratorError> {
        let _guard = self.gate.lock().await;

        let filter = TaskFilter::new(&self.config.cluster, &self.config.started_by);
        let running = self.cluster.list_tasks(&filter).await?;

        if running.is_empty() {
            let id = self.locator.find(InstanceState::Stopped).await?;
            info!(instance = %id, "starting CI host instance");
            self.instances.start_instance(&id).await?;
            self.wait_until_running(&id).await?;

            let spec = RunTaskSpec::single(
                &self.config.cluster,
                &self.config.task_definition,
                &self.config.launch_type,
                &self.config.started_by,
            );
            let arn = self.cluster.run_task(&spec).await?;
            info!(task = %arn, "CI task launched");
        } else {
            debug!(count = running.len(), "CI task already running, skipping provisioning");
        }

        self.scheduler.arm().await?;
        Ok(())
    }

    /// Tear the CI server down if it is running: the task first, then the
    /// backing instance, so no billed compute is orphaned.
    #[instrument(level = "info", skip(self))]
    pub async fn stop(&self) -> Result<(), OrchestratorError> {
        let _guard = self.gate.lock().await;

        let filter = TaskFilter::new(&self.config.cluster, &self.config.started_by);
        let running = self.cluster.list_tasks(&filter).await?;

        let Some(task) = running.first() else {
            debug!("no running CI task, nothing to stop");
            return Ok(());
        };

        info!(task = %task, "stopping CI task");
        self.cluster.stop_task(&self.config.cluster, task).await?;

        let id = self.locator.find(InstanceState::Running).await?;
        info!(instance = %id, "stopping CI host instance");
        self.instances.stop_instance(&id).await?;
        Ok(())
    }

    /// Poll the instance until it reports running, bounded by the configured
    /// timeout.
    async fn wait_until_running(&self, id: &InstanceId) -> Result<(), OrchestratorError> {
        let started = tokio::time::Instant::now();

        loop {
            match self.instances.describe_instance(id).await? {
                Some(instance) if instance.state == InstanceState::Running => {
                    debug!(instance = %id, elapsed = ?started.elapsed(), "instance is running");
                    return Ok(());
                }
                Some(instance) => {
                    debug!(instance = %id, state = ?instance.state, "instance not ready yet");
                }
                None => {
                    warn!(instance = %id, "instance disappeared from describe while waiting");
                }
            }

            if started.elapsed() >= self.config.readiness_timeout {
                return Err(OrchestratorError::ReadinessTimeout {
                    id: id.clone(),
                    waited: self.config.readiness_timeout,
                });
            }
            tokio::time::sleep(self.config.readiness_poll_interval).await;
        }
    }
}
