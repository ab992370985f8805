//! Reset signal dispatch.
//!
//! Each announcement kind is either idle or armed. A trigger arms the kind by
//! flipping `watcher_armed` in the database and spawns a watch on its
//! infographic link. Once the link changes, an [`AnnouncementReady`] is
//! broadcast and the kind returns to idle.

use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;
use tokio::sync::broadcast;
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use crate::{
    data::post_settings::PostSettingsRepository,
    error::AppError,
    model::{announcement::AnnouncementKind, post_settings::PostSettingsDefaults},
    service::url_watcher::{LinkResolver, UrlWatcher},
};

const READY_CAPACITY: usize = 16;

/// Broadcast once the content for `kind` is ready to announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnouncementReady {
    pub kind: AnnouncementKind,
}

/// What a trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A new watch was started.
    Armed,
    /// A watch for this kind is already running.
    AlreadyArmed,
    /// Automatic announcements are turned off for this kind.
    Disabled,
    /// The announcement was broadcast right away.
    Announced,
}

#[derive(Debug, Clone)]
pub struct DispatchOptions {
    pub poll_interval: Duration,
    /// Broadcast on every trigger without waiting for the link to change.
    pub trigger_without_url_update: bool,
}

struct Inner {
    db: DatabaseConnection,
    resolver: Arc<dyn LinkResolver>,
    options: DispatchOptions,
    sender: broadcast::Sender<AnnouncementReady>,
    shutdown: CancellationToken,
    watches: TaskTracker,
}

/// Shared handle to the dispatcher. Clones refer to the same watches.
#[derive(Clone)]
pub struct SignalDispatcher {
    inner: Arc<Inner>,
}

impl SignalDispatcher {
    pub fn new(
        db: DatabaseConnection,
        resolver: Arc<dyn LinkResolver>,
        options: DispatchOptions,
    ) -> Self {
        let (sender, _) = broadcast::channel(READY_CAPACITY);

        Self {
            inner: Arc::new(Inner {
                db,
                resolver,
                options,
                sender,
                shutdown: CancellationToken::new(),
                watches: TaskTracker::new(),
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AnnouncementReady> {
        self.inner.sender.subscribe()
    }

    /// Handles a reset signal for `kind`.
    ///
    /// Called by the cron scheduler and the loopback relay.
    ///
    /// # Returns
    /// - `Ok(TriggerOutcome)` - What the trigger did
    /// - `Err(AppError)` - Database error while reading or arming the settings
    pub async fn trigger(&self, kind: AnnouncementKind) -> Result<TriggerOutcome, AppError> {
        let repo = PostSettingsRepository::new(&self.inner.db);
        let settings = repo
            .get_or_create(kind, PostSettingsDefaults::for_kind(kind))
            .await?;

        if !settings.autoannounce_enabled {
            tracing::info!(
                "Ignoring {} signal, automatic announcements are disabled",
                kind.as_str()
            );
            return Ok(TriggerOutcome::Disabled);
        }

        if self.inner.options.trigger_without_url_update {
            tracing::debug!("Announcing {} without waiting for a new link", kind.as_str());
            self.broadcast(kind);
        }

        if !repo.try_arm(kind).await? {
            tracing::info!("{} watch is already armed", kind.as_str());
            return Ok(TriggerOutcome::AlreadyArmed);
        }

        self.spawn_watch(kind);

        Ok(TriggerOutcome::Armed)
    }

    /// Broadcasts an [`AnnouncementReady`] for `kind` without watching the link.
    ///
    /// Used by the manual announce command. Kinds with automatic
    /// announcements turned off are still left alone.
    pub async fn announce_now(&self, kind: AnnouncementKind) -> Result<TriggerOutcome, AppError> {
        let settings = PostSettingsRepository::new(&self.inner.db)
            .get_or_create(kind, PostSettingsDefaults::for_kind(kind))
            .await?;

        if !settings.autoannounce_enabled {
            tracing::info!(
                "Ignoring manual {} announcement, automatic announcements are disabled",
                kind.as_str()
            );
            return Ok(TriggerOutcome::Disabled);
        }

        tracing::info!("Announcing {} on request", kind.as_str());
        self.broadcast(kind);

        Ok(TriggerOutcome::Announced)
    }

    /// Re-triggers the kinds a previous process left armed.
    ///
    /// Their watches died with that process, so the flags are cleared first.
    pub async fn resume_stale(&self) -> Result<Vec<AnnouncementKind>, AppError> {
        let stale = PostSettingsRepository::new(&self.inner.db)
            .take_stale_armed()
            .await?;

        for kind in &stale {
            tracing::info!("Resuming {} watch left armed by a previous run", kind.as_str());
            if let Err(e) = self.trigger(*kind).await {
                tracing::error!("Failed to resume {} watch: {}", kind.as_str(), e);
            }
        }

        Ok(stale)
    }

    /// Cancels every running watch and waits for each to disarm its row.
    pub async fn shutdown(&self) {
        self.inner.shutdown.cancel();
        self.inner.watches.close();
        self.inner.watches.wait().await;

        tracing::info!("Signal dispatcher stopped");
    }

    fn spawn_watch(&self, kind: AnnouncementKind) {
        let dispatcher = self.clone();

        self.inner.watches.spawn(async move {
            let inner = &dispatcher.inner;
            let watcher = UrlWatcher::new(
                &inner.db,
                inner.resolver.as_ref(),
                inner.options.poll_interval,
            );

            match watcher.poll_until_changed(kind, &inner.shutdown).await {
                Ok(Some(_)) => dispatcher.broadcast(kind),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!("{} watch failed: {}", kind.as_str(), e);
                    if let Err(e) = PostSettingsRepository::new(&inner.db).disarm(kind).await {
                        tracing::error!("Failed to disarm {} watch: {}", kind.as_str(), e);
                    }
                }
            }
        });
    }

    fn broadcast(&self, kind: AnnouncementKind) {
        if self.inner.sender.send(AnnouncementReady { kind }).is_err() {
            tracing::warn!("No announcer listening for {} announcement", kind.as_str());
        }
    }
}
