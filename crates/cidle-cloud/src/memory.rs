use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cidle_model::{
    Instance, InstanceId, InstanceState, RunTaskSpec, StopSchedule, TaskArn, TaskFilter,
    TaskStatus,
};

use crate::{ClusterApi, InstanceApi, ScheduleApi, SecretStore, error::CloudError};

/// Per-operation call counters, snapshot via [`MemoryCloud::calls`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallLog {
    pub list_tasks: usize,
    pub run_task: usize,
    pub stop_task: usize,
    pub describe_instances: usize,
    pub describe_instance: usize,
    pub start_instance: usize,
    pub stop_instance: usize,
    pub upsert_rule: usize,
    pub get_parameter: usize,
}

struct TaskRecord {
    arn: TaskArn,
    cluster: String,
    started_by: String,
    status: TaskStatus,
}

struct MemoryCloudInner {
    tasks: Vec<TaskRecord>,
    instances: HashMap<InstanceId, Instance>,
    secrets: HashMap<String, String>,
    rules: HashMap<String, StopSchedule>,
    calls: CallLog,
    /// Operations forced to fail, by name.
    failing: HashSet<&'static str>,
    /// How many describe_instance calls a pending instance takes to report
    /// running.
    polls_until_running: u32,
    poll_countdown: HashMap<InstanceId, u32>,
}

/// In-memory simulation of all four provider control planes.
///
/// Backs the orchestrator tests (call-count assertions) and the local daemon
/// harness. Started instances pass through `pending` and report `running`
/// after a configurable number of describe polls.
#[derive(Clone)]
pub struct MemoryCloud {
    inner: Arc<Mutex<MemoryCloudInner>>,
}

impl MemoryCloud {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryCloudInner {
                tasks: Vec::new(),
                instances: HashMap::new(),
                secrets: HashMap::new(),
                rules: HashMap::new(),
                calls: CallLog::default(),
                failing: HashSet::new(),
                polls_until_running: 1,
                poll_countdown: HashMap::new(),
            })),
        }
    }

    pub fn insert_instance(&self, instance: Instance) {
        self.lock().instances.insert(instance.id.clone(), instance);
    }

    pub fn insert_secret(&self, name: impl Into<String>, value: impl Into<String>) {
        self.lock().secrets.insert(name.into(), value.into());
    }

    /// Seed a task already running under the given ownership tag.
    pub fn insert_running_task(&self, cluster: &str, started_by: &str, arn: &str) {
        self.lock().tasks.push(TaskRecord {
            arn: TaskArn::from(arn),
            cluster: cluster.to_string(),
            started_by: started_by.to_string(),
            status: TaskStatus::Running,
        });
    }

    /// Force the named operation to fail with a provider error.
    pub fn fail_on(&self, op: &'static str) {
        self.lock().failing.insert(op);
    }

    /// Number of describe polls before a started instance reports running.
    pub fn set_polls_until_running(&self, polls: u32) {
        self.lock().polls_until_running = polls;
    }

    pub fn calls(&self) -> CallLog {
        self.lock().calls.clone()
    }

    pub fn rule(&self, name: &str) -> Option<StopSchedule> {
        self.lock().rules.get(name).copied()
    }

    pub fn instance_state(&self, id: &InstanceId) -> Option<InstanceState> {
        self.lock().instances.get(id).map(|i| i.state)
    }

    pub fn task_status(&self, arn: &TaskArn) -> Option<TaskStatus> {
        self.lock()
            .tasks
            .iter()
            .find(|t| &t.arn == arn)
            .map(|t| t.status)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryCloudInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCloudInner {
    fn check(&self, op: &'static str) -> Result<(), CloudError> {
        if self.failing.contains(op) {
            return Err(CloudError::Provider(format!("injected failure: {op}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ClusterApi for MemoryCloud {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<TaskArn>, CloudError> {
        let mut inner = self.lock();
        inner.calls.list_tasks += 1;
        inner.check("list_tasks")?;

        Ok(inner
            .tasks
            .iter()
            .filter(|t| {
                t.cluster == filter.cluster
                    && t.started_by == filter.started_by
                    && t.status == filter.status
            })
            .map(|t| t.arn.clone())
            .collect())
    }

    async fn run_task(&self, spec: &RunTaskSpec) -> Result<TaskArn, CloudError> {
        let mut inner = self.lock();
        inner.calls.run_task += 1;
        inner.check("run_task")?;

        let arn = TaskArn::from(format!("task/{}", uuid::Uuid::new_v4()));
        inner.tasks.push(TaskRecord {
            arn: arn.clone(),
            cluster: spec.cluster.clone(),
            started_by: spec.started_by.clone(),
            status: TaskStatus::Running,
        });
        Ok(arn)
    }

    async fn stop_task(&self, cluster: &str, task: &TaskArn) -> Result<(), CloudError> {
        let mut inner = self.lock();
        inner.calls.stop_task += 1;
        inner.check("stop_task")?;

        match inner
            .tasks
            .iter_mut()
            .find(|t| t.cluster == cluster && &t.arn == task)
        {
            Some(record) => {
                record.status = TaskStatus::Stopped;
                Ok(())
            }
            None => Err(CloudError::Provider(format!("no such task: {task}"))),
        }
    }
}

#[async_trait]
impl InstanceApi for MemoryCloud {
    async fn describe_instances(
        &self,
        state: InstanceState,
    ) -> Result<Vec<Instance>, CloudError> {
        let mut inner = self.lock();
        inner.calls.describe_instances += 1;
        inner.check("describe_instances")?;

        Ok(inner
            .instances
            .values()
            .filter(|i| i.state == state)
            .cloned()
            .collect())
    }

    async fn describe_instance(&self, id: &InstanceId) -> Result<Option<Instance>, CloudError> {
        let mut inner = self.lock();
        inner.calls.describe_instance += 1;
        inner.check("describe_instance")?;

        // A pending instance flips to running once its poll countdown drains.
        if let Some(remaining) = inner.poll_countdown.get(id).copied() {
            if remaining <= 1 {
                inner.poll_countdown.remove(id);
                if let Some(instance) = inner.instances.get_mut(id) {
                    instance.state = InstanceState::Running;
                }
            } else {
                inner.poll_countdown.insert(id.clone(), remaining - 1);
            }
        }

        Ok(inner.instances.get(id).cloned())
    }

    async fn start_instance(&self, id: &InstanceId) -> Result<(), CloudError> {
        let mut inner = self.lock();
        inner.calls.start_instance += 1;
        inner.check("start_instance")?;

        let polls = inner.polls_until_running;
        match inner.instances.get_mut(id) {
            Some(instance) => {
                if polls == 0 {
                    instance.state = InstanceState::Running;
                } else {
                    instance.state = InstanceState::Pending;
                    inner.poll_countdown.insert(id.clone(), polls);
                }
                Ok(())
            }
            None => Err(CloudError::NoSuchInstance(id.to_string())),
        }
    }

    async fn stop_instance(&self, id: &InstanceId) -> Result<(), CloudError> {
        let mut inner = self.lock();
        inner.calls.stop_instance += 1;
        inner.check("stop_instance")?;

        match inner.instances.get_mut(id) {
            Some(instance) => {
                instance.state = InstanceState::Stopped;
                Ok(())
            }
            None => Err(CloudError::NoSuchInstance(id.to_string())),
        }
    }
}

#[async_trait]
impl ScheduleApi for MemoryCloud {
    async fn upsert_rule(&self, name: &str, schedule: &StopSchedule) -> Result<(), CloudError> {
        let mut inner = self.lock();
        inner.calls.upsert_rule += 1;
        inner.check("upsert_rule")?;

        inner.rules.insert(name.to_string(), *schedule);
        Ok(())
    }
}

#[async_trait]
impl SecretStore for MemoryCloud {
    async fn get(&self, name: &str, _decrypt: bool) -> Result<String, CloudError> {
        let mut inner = self.lock();
        inner.calls.get_parameter += 1;
        inner.check("get_parameter")?;

        inner
            .secrets
            .get(name)
            .cloned()
            .ok_or_else(|| CloudError::MissingParameter(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn instance(id: &str, state: InstanceState, name: &str) -> Instance {
        Instance {
            id: InstanceId::from(id),
            state,
            tags: HashMap::from([("Name".to_string(), name.to_string())]),
        }
    }

    #[tokio::test]
    async fn list_tasks_applies_full_filter() {
        let cloud = MemoryCloud::new();
        cloud.insert_running_task("ci-cluster", "cidle", "task/a");
        cloud.insert_running_task("ci-cluster", "someone-else", "task/b");
        cloud.insert_running_task("other-cluster", "cidle", "task/c");

        let filter = TaskFilter::new("ci-cluster", "cidle");
        let tasks = cloud.list_tasks(&filter).await.unwrap();

        assert_eq!(tasks, vec![TaskArn::from("task/a")]);
        assert_eq!(cloud.calls().list_tasks, 1);
    }

    #[tokio::test]
    async fn started_instance_reports_running_after_polls() {
        let cloud = MemoryCloud::new();
        cloud.insert_instance(instance("i-1", InstanceState::Stopped, "ci-host"));
        cloud.set_polls_until_running(2);

        let id = InstanceId::from("i-1");
        cloud.start_instance(&id).await.unwrap();
        assert_eq!(cloud.instance_state(&id), Some(InstanceState::Pending));

        let first = cloud.describe_instance(&id).await.unwrap().unwrap();
        assert_eq!(first.state, InstanceState::Pending);

        let second = cloud.describe_instance(&id).await.unwrap().unwrap();
        assert_eq!(second.state, InstanceState::Running);
    }

    #[tokio::test]
    async fn upsert_rule_overwrites() {
        let cloud = MemoryCloud::new();
        let first = StopSchedule::after(datetime!(2026-08-29 10:00:00 UTC), time::Duration::hours(1));
        let second = StopSchedule::after(datetime!(2026-08-29 12:00:00 UTC), time::Duration::hours(1));

        cloud.upsert_rule("cidle-stop", &first).await.unwrap();
        cloud.upsert_rule("cidle-stop", &second).await.unwrap();

        assert_eq!(cloud.rule("cidle-stop"), Some(second));
        assert_eq!(cloud.calls().upsert_rule, 2);
    }

    #[tokio::test]
    async fn injected_failure_surfaces() {
        let cloud = MemoryCloud::new();
        cloud.fail_on("run_task");

        let spec = RunTaskSpec::single("ci-cluster", "ci-server", "EC2", "cidle");
        let err = cloud.run_task(&spec).await.unwrap_err();
        assert!(matches!(err, CloudError::Provider(_)));
    }

    #[tokio::test]
    async fn missing_parameter_is_structured() {
        let cloud = MemoryCloud::new();
        let err = cloud.get("github/webhook-secret", true).await.unwrap_err();
        assert!(matches!(err, CloudError::MissingParameter(_)));
    }
}
