//! Turns `AnnouncementReady` broadcasts into posted announcements.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;

use crate::service::{
    announcement::AnnouncementService,
    dispatcher::AnnouncementReady,
    fanout::{AnnouncementSink, FanoutProgress, ProgressReporter},
};

/// Reports automatic announcements to the log, since no admin is waiting on them.
pub struct LogProgressReporter;

#[async_trait]
impl ProgressReporter for LogProgressReporter {
    async fn report(&self, progress: &FanoutProgress) {
        tracing::info!(
            "Announcement progress {}/{} ({} ok, {} failed)",
            progress.processed,
            progress.total,
            progress.tally.success,
            progress.tally.failed()
        );
    }
}

/// Posts an announcement for every ready signal until `shutdown` is cancelled
/// or the dispatcher goes away.
///
/// Cancellation is only observed between batches, so a batch in progress
/// still commits its message ids. A receiver that falls behind logs the
/// skipped signals and carries on with the next one.
pub async fn listen(
    mut receiver: broadcast::Receiver<AnnouncementReady>,
    db: DatabaseConnection,
    sink: Arc<dyn AnnouncementSink>,
    disable_bad_channels: bool,
    shutdown: CancellationToken,
) {
    loop {
        let received = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            received = receiver.recv() => received,
        };

        let ready = match received {
            Ok(ready) => ready,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Announcer lagged, {} signals skipped", skipped);
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        let service = AnnouncementService::new(&db);
        match service
            .announce(ready.kind, sink.as_ref(), &LogProgressReporter, disable_bad_channels)
            .await
        {
            Ok(report) => tracing::info!("{} announcement: {}", ready.kind.as_str(), report.summary()),
            Err(e) => tracing::error!("Failed to announce {}: {}", ready.kind.as_str(), e),
        }
    }

    tracing::info!("Announcer stopped");
}
