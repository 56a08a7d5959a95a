use time::{Duration, OffsetDateTime};

/// A one-shot stop deadline for the CI task.
///
/// Carries the real timestamp; schedulers with a native one-time trigger
/// should use [`StopSchedule::fire_at`] directly. [`StopSchedule::to_cron`]
/// exists for schedulers that only accept cron expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopSchedule {
    fire_at: OffsetDateTime,
}

impl StopSchedule {
    /// Schedule a stop at `delay` past `now`.
    pub fn after(now: OffsetDateTime, delay: Duration) -> Self {
        Self {
            fire_at: now + delay,
        }
    }

    /// The moment the stop should fire.
    pub fn fire_at(&self) -> OffsetDateTime {
        self.fire_at
    }

    /// Render as a cron expression at minute/hour/day/month granularity with
    /// the year pinned.
    ///
    /// A pinned cron expression still recurs yearly at the same point; callers
    /// with a one-time trigger primitive should prefer [`StopSchedule::fire_at`].
    pub fn to_cron(&self) -> String {
        format!(
            "cron({} {} {} {} ? {})",
            self.fire_at.minute(),
            self.fire_at.hour(),
            self.fire_at.day(),
            self.fire_at.month() as u8,
            self.fire_at.year(),
        )
    }
}
