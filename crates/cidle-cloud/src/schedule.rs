use async_trait::async_trait;
use cidle_model::StopSchedule;

use crate::error::CloudError;

/// Control plane of the time-based trigger service.
#[async_trait]
pub trait ScheduleApi: Send + Sync + 'static {
    /// Create or overwrite the named rule so it fires at the scheduled time.
    ///
    /// Implementations backed by a cron-only scheduler render the schedule
    /// with [`StopSchedule::to_cron`]; note that a pinned cron expression
    /// recurs yearly, so such implementations should also remove the rule
    /// once it has fired.
    async fn upsert_rule(&self, name: &str, schedule: &StopSchedule) -> Result<(), CloudError>;
}
