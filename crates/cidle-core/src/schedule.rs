use std::sync::Arc;

use tracing::info;

use cidle_cloud::ScheduleApi;
use cidle_model::StopSchedule;

use crate::{clock::Clock, error::OrchestratorError};

/// Arms the stop schedule that will invoke the stop orchestrator later.
pub struct StopScheduler {
    schedule: Arc<dyn ScheduleApi>,
    clock: Arc<dyn Clock>,
    rule_name: String,
    delay: time::Duration,
}

impl StopScheduler {
    pub fn new(
        schedule: Arc<dyn ScheduleApi>,
        clock: Arc<dyn Clock>,
        rule_name: impl Into<String>,
        delay: time::Duration,
    ) -> Self {
        Self {
            schedule,
            clock,
            rule_name: rule_name.into(),
            delay,
        }
    }

    /// Upsert the named rule to fire `delay` from now.
    ///
    /// The rule is overwritten on every call, so repeated starts push the
    /// stop deadline out rather than stacking triggers.
    pub async fn arm(&self) -> Result<StopSchedule, OrchestratorError> {
        let schedule = StopSchedule::after(self.clock.now(), self.delay);
        self.schedule.upsert_rule(&self.rule_name, &schedule).await?;
        info!(rule = %self.rule_name, fire_at = %schedule.fire_at(), "stop schedule armed");
        Ok(schedule)
    }
}
