use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    error::AppError, model::announcement::AnnouncementKind, service::dispatcher::SignalDispatcher,
};

/// Builds the cron job that sends the reset signal for `kind`.
fn reset_job(kind: AnnouncementKind, dispatcher: SignalDispatcher) -> Result<Job, AppError> {
    let job = Job::new_async(kind.profile().reset_schedule, move |_uuid, _lock| {
        let dispatcher = dispatcher.clone();

        Box::pin(async move {
            tracing::info!("{} reset reached", kind.profile().name);

            if let Err(e) = dispatcher.trigger(kind).await {
                tracing::error!("Error triggering {} signal: {}", kind.as_str(), e);
            }
        })
    })?;

    Ok(job)
}

/// Starts the reset signal scheduler
///
/// Schedules one job per announcement kind at its reset time (UTC):
/// - Daily every day at 17:00
/// - Weekly on Tuesday at 17:00
/// - Weekend on Friday at 17:00
///
/// # Arguments
/// - `dispatcher`: Receives the signals
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler, kept to shut it down later
pub async fn start_scheduler(dispatcher: SignalDispatcher) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    for kind in AnnouncementKind::ALL {
        scheduler.add(reset_job(kind, dispatcher.clone())?).await?;
    }

    scheduler.start().await?;

    tracing::info!("Reset signal scheduler started");

    Ok(scheduler)
}
