//! Announcement fan-out and correction.
//!
//! A fan-out walks the enabled channel records of one kind in insertion order
//! and either posts a new embed or edits the last one posted. Failures are
//! classified per channel and never stop the batch. Every database mutation the
//! batch produces is collected into a [`ChannelBatchUpdate`] and committed by the
//! caller in one transaction once the batch is over.

use std::time::Duration;

use serenity::async_trait;
use tokio::time::Instant;

use crate::{
    error::delivery::DeliveryError,
    model::{
        channel_record::{ChannelBatchUpdate, ChannelRecord},
        embed::AnnouncementEmbed,
    },
};

/// Target time between two progress reports.
pub const REPORT_EVERY: Duration = Duration::from_secs(10);

/// Lower bound on the measured per-channel time, so instant batches do not
/// divide by zero.
const MIN_RATE: Duration = Duration::from_millis(1);

/// Where announcement embeds are delivered.
#[async_trait]
pub trait AnnouncementSink: Send + Sync {
    /// Posts a new embed into a guild channel.
    ///
    /// # Returns
    /// - `Ok(message_id)` - Id of the posted message
    /// - `Err(DeliveryError)` - Classified failure
    async fn post_message(
        &self,
        channel_id: u64,
        embed: &AnnouncementEmbed,
    ) -> Result<u64, DeliveryError>;

    /// Replaces the embed of a previously posted message.
    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        embed: &AnnouncementEmbed,
    ) -> Result<(), DeliveryError>;
}

/// Receives progress snapshots while a batch runs.
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    async fn report(&self, progress: &FanoutProgress);
}

/// Whether a batch posts new messages or corrects existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanoutMode {
    Post,
    Edit,
}

/// Outcome counters of a batch, one per outcome class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanoutTally {
    pub success: usize,
    /// Records never posted to; only counted when correcting.
    pub skipped: usize,
    pub not_found: usize,
    pub forbidden: usize,
    pub rate_limited: usize,
    pub bad_request: usize,
    pub not_guild_channel: usize,
    pub unknown: usize,
}

impl FanoutTally {
    fn record_failure(&mut self, err: &DeliveryError) {
        let counter = match err {
            DeliveryError::NotFound => &mut self.not_found,
            DeliveryError::Forbidden => &mut self.forbidden,
            DeliveryError::RateLimited => &mut self.rate_limited,
            DeliveryError::BadRequest(_) => &mut self.bad_request,
            DeliveryError::NotGuildChannel => &mut self.not_guild_channel,
            DeliveryError::Unknown(_) => &mut self.unknown,
        };
        *counter += 1;
    }

    pub fn failed(&self) -> usize {
        self.not_found
            + self.forbidden
            + self.rate_limited
            + self.bad_request
            + self.not_guild_channel
            + self.unknown
    }
}

/// Snapshot handed to a [`ProgressReporter`].
#[derive(Debug, Clone, PartialEq)]
pub struct FanoutProgress {
    pub mode: FanoutMode,
    pub processed: usize,
    pub total: usize,
    pub tally: FanoutTally,
    pub elapsed: Duration,
}

impl FanoutProgress {
    pub fn is_done(&self) -> bool {
        self.processed == self.total
    }

    /// Counters as `(label, value)` pairs for display.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let tally = &self.tally;
        let mut fields = vec![
            ("Progress", format!("{}/{}", self.processed, self.total)),
            ("Success", tally.success.to_string()),
        ];
        if self.mode == FanoutMode::Edit {
            fields.push(("Never posted", tally.skipped.to_string()));
        }
        fields.extend([
            ("Not found", tally.not_found.to_string()),
            ("Forbidden", tally.forbidden.to_string()),
            ("Rate limited", tally.rate_limited.to_string()),
            ("Bad request", tally.bad_request.to_string()),
            ("Not a guild channel", tally.not_guild_channel.to_string()),
            ("Unknown error", tally.unknown.to_string()),
            ("Elapsed", format!("{}s", self.elapsed.as_secs())),
        ]);
        fields
    }
}

/// Result of a finished batch.
#[derive(Debug, Clone)]
pub struct FanoutReport {
    pub mode: FanoutMode,
    pub total: usize,
    pub tally: FanoutTally,
    pub elapsed: Duration,
    /// Number of progress reports emitted.
    pub reports: usize,
    /// Mutations to commit in one transaction.
    pub update: ChannelBatchUpdate,
}

impl FanoutReport {
    /// One-line summary for the invoking admin and the logs.
    pub fn summary(&self) -> String {
        match self.mode {
            FanoutMode::Edit => {
                format!("{} posts corrected", self.total - self.tally.skipped)
            }
            FanoutMode::Post => format!("{} posts sent", self.tally.success),
        }
    }
}

/// Number of iterations between two progress reports.
///
/// Aims for one report every [`REPORT_EVERY`] given the average time per
/// iteration so far, and never less than every iteration.
pub fn report_interval(elapsed: Duration, processed: usize) -> usize {
    let processed = u32::try_from(processed.max(1)).unwrap_or(u32::MAX);
    let rate = (elapsed / processed).max(MIN_RATE);
    let interval = (REPORT_EVERY.as_secs_f64() / rate.as_secs_f64()).round() as usize;

    interval.max(1)
}

/// Runs fan-out batches against a sink.
pub struct Fanout<'a> {
    sink: &'a dyn AnnouncementSink,
    progress: &'a dyn ProgressReporter,
    disable_bad_channels: bool,
}

impl<'a> Fanout<'a> {
    /// # Arguments
    /// - `sink` - Where embeds are posted or edited
    /// - `progress` - Receives periodic snapshots
    /// - `disable_bad_channels` - Unsubscribe channels that are gone or forbidden
    pub fn new(
        sink: &'a dyn AnnouncementSink,
        progress: &'a dyn ProgressReporter,
        disable_bad_channels: bool,
    ) -> Self {
        Self {
            sink,
            progress,
            disable_bad_channels,
        }
    }

    /// Delivers `embed` to every record, in the order given.
    ///
    /// In `Edit` mode records that were never posted to are skipped. In `Post`
    /// mode each new message id is queued as the record's `last_message_id`.
    pub async fn run(
        &self,
        mode: FanoutMode,
        records: &[ChannelRecord],
        embed: &AnnouncementEmbed,
    ) -> FanoutReport {
        let total = records.len();
        let start = Instant::now();
        let mut tally = FanoutTally::default();
        let mut update = ChannelBatchUpdate::default();
        let mut reports = 0;

        for (index, record) in records.iter().enumerate() {
            let outcome = match (mode, record.last_message_id) {
                (FanoutMode::Edit, None) => {
                    tracing::debug!("Channel {} was never posted to, skipping", record.channel_id);
                    tally.skipped += 1;
                    None
                }
                (FanoutMode::Edit, Some(message_id)) => Some(
                    self.sink
                        .edit_message(record.channel_id, message_id, embed)
                        .await,
                ),
                (FanoutMode::Post, _) => Some(
                    self.sink
                        .post_message(record.channel_id, embed)
                        .await
                        .map(|message_id| update.last_messages.push((record.id, message_id))),
                ),
            };

            match outcome {
                Some(Ok(())) => tally.success += 1,
                Some(Err(err)) => {
                    tracing::warn!(
                        "Failed to deliver to channel {} in server {}: {}",
                        record.channel_id,
                        record.server_id,
                        err
                    );
                    tally.record_failure(&err);
                    if self.disable_bad_channels && err.is_dead_channel() {
                        update.disabled.push(record.id);
                    }
                }
                None => {}
            }

            let processed = index + 1;
            let elapsed = start.elapsed();
            if processed % report_interval(elapsed, processed) == 0 || processed == total {
                reports += 1;
                self.progress
                    .report(&FanoutProgress {
                        mode,
                        processed,
                        total,
                        tally: tally.clone(),
                        elapsed,
                    })
                    .await;
            }
        }

        let report = FanoutReport {
            mode,
            total,
            tally,
            elapsed: start.elapsed(),
            reports,
            update,
        };

        tracing::info!(
            "{} in {}s ({} failed)",
            report.summary(),
            report.elapsed.as_secs(),
            report.tally.failed()
        );

        report
    }
}
