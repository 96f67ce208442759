//! Weekly trigger scheduler.
//!
//! Registers the start and stop triggers of a [`WeeklySchedule`] on a
//! [`JobScheduler`]. Jobs do no recording work themselves: each firing
//! sends a message to the main loop, which owns the recording controller.

use tokio::sync::mpsc;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::domain::schedule::{TriggerKind, WeeklySchedule, WeeklyTrigger};

/// Builds and starts the trigger scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process. Dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a trigger cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler<S>(
    schedule: &WeeklySchedule,
    sender: mpsc::Sender<S>,
) -> Result<JobScheduler, JobSchedulerError>
where
    S: From<TriggerKind> + Send + 'static,
{
    let scheduler = JobScheduler::new().await?;

    for trigger in schedule.triggers() {
        register_trigger(&scheduler, trigger, sender.clone()).await?;
    }

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register one weekly trigger in its own timezone.
async fn register_trigger<S>(
    scheduler: &JobScheduler,
    trigger: WeeklyTrigger,
    sender: mpsc::Sender<S>,
) -> Result<(), JobSchedulerError>
where
    S: From<TriggerKind> + Send + 'static,
{
    let cron = trigger.cron_expression();
    let kind = trigger.kind;

    let job = Job::new_async_tz(cron.as_str(), trigger.timezone, move |_uuid, _lock| {
        let sender = sender.clone();

        Box::pin(async move {
            tracing::info!(trigger = %kind, "scheduler: trigger fired");
            if sender.send(S::from(kind)).await.is_err() {
                tracing::warn!(trigger = %kind, "scheduler: main loop is gone; trigger dropped");
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(
        trigger = %kind,
        cron = %cron,
        timezone = %trigger.timezone.name(),
        "scheduler: registered trigger"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::domain::schedule::DEFAULT_TIMEZONE;

    fn schedule(start: &str, end: &str) -> WeeklySchedule {
        WeeklySchedule::new(
            start.parse().unwrap(),
            end.parse().unwrap(),
            Weekday::Sat,
            WeeklySchedule::parse_timezone(DEFAULT_TIMEZONE).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn builds_scheduler_with_both_triggers() {
        let (tx, _rx) = mpsc::channel::<TriggerKind>(4);
        let mut scheduler = build_scheduler(&schedule("19:00", "21:00"), tx)
            .await
            .unwrap();
        scheduler.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn builds_scheduler_for_window_crossing_midnight() {
        let (tx, _rx) = mpsc::channel::<TriggerKind>(4);
        let mut scheduler = build_scheduler(&schedule("23:00", "1:00"), tx)
            .await
            .unwrap();
        scheduler.shutdown().await.unwrap();
    }
}
