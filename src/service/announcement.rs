//! Announcement embeds and the batches that deliver them.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::{channel_record::ChannelRecordRepository, post_settings::PostSettingsRepository},
    error::AppError,
    model::{
        announcement::{AnnouncementKind, AnnouncementProfile, ANNOUNCEMENT_COLOR},
        embed::AnnouncementEmbed,
        post_settings::PostSettings,
    },
    service::{
        fanout::{AnnouncementSink, Fanout, FanoutMode, FanoutReport, ProgressReporter},
        url_watcher::{LinkResolver, UrlWatcher},
    },
};

/// Builds the embed for `kind` as of `now`.
///
/// The image is the last redirect target of the infographic link and the title
/// links to the post url.
pub fn build_embed(settings: &PostSettings, now: DateTime<Utc>) -> AnnouncementEmbed {
    let profile = settings.kind.profile();
    let window = (profile.validity_period)(now);

    AnnouncementEmbed {
        title: AnnouncementProfile::render(profile.embed_title, &window),
        url: settings.post_url.clone(),
        description: AnnouncementProfile::render(profile.embed_description, &window),
        image_url: settings.redirect_target.clone(),
        color: ANNOUNCEMENT_COLOR,
    }
}

pub struct AnnouncementService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnnouncementService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Re-checks the infographic link and builds the current embed.
    ///
    /// Used by the user-facing embed commands, so the image is fresh even when
    /// no watch is running.
    pub async fn current_embed(
        &self,
        kind: AnnouncementKind,
        resolver: &dyn LinkResolver,
        interval: Duration,
    ) -> Result<AnnouncementEmbed, AppError> {
        let check = UrlWatcher::new(self.db, resolver, interval)
            .check(kind)
            .await?;

        Ok(build_embed(&check.settings, Utc::now()))
    }

    /// Posts a new announcement into every enabled channel of `kind`.
    pub async fn announce(
        &self,
        kind: AnnouncementKind,
        sink: &dyn AnnouncementSink,
        progress: &dyn ProgressReporter,
        disable_bad_channels: bool,
    ) -> Result<FanoutReport, AppError> {
        self.deliver(kind, FanoutMode::Post, sink, progress, disable_bad_channels)
            .await
    }

    /// Edits the last announcement in every enabled channel of `kind`.
    ///
    /// Safe to rerun: it never posts, and nothing is persisted unless the whole
    /// batch finishes.
    pub async fn correct(
        &self,
        kind: AnnouncementKind,
        sink: &dyn AnnouncementSink,
        progress: &dyn ProgressReporter,
        disable_bad_channels: bool,
    ) -> Result<FanoutReport, AppError> {
        self.deliver(kind, FanoutMode::Edit, sink, progress, disable_bad_channels)
            .await
    }

    async fn deliver(
        &self,
        kind: AnnouncementKind,
        mode: FanoutMode,
        sink: &dyn AnnouncementSink,
        progress: &dyn ProgressReporter,
        disable_bad_channels: bool,
    ) -> Result<FanoutReport, AppError> {
        let settings = PostSettingsRepository::new(self.db)
            .find(kind)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No {} settings to build an embed from", kind.as_str()))
            })?;

        let channel_repo = ChannelRecordRepository::new(self.db);
        let records = channel_repo.get_enabled(kind).await?;
        let embed = build_embed(&settings, Utc::now());

        tracing::info!(
            "Delivering {} announcement to {} channels ({:?})",
            kind.as_str(),
            records.len(),
            mode
        );

        let report = Fanout::new(sink, progress, disable_bad_channels)
            .run(mode, &records, &embed)
            .await;

        channel_repo.apply_batch(&report.update).await?;

        Ok(report)
    }
}
