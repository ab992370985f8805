//! Discord-backed implementations of the fan-out seams.

use std::sync::Arc;

use serenity::{
    all::{Channel, ChannelId, CreateMessage, EditMessage, MessageId},
    async_trait,
    http::Http,
};

use crate::{
    error::delivery::DeliveryError,
    model::embed::{progress_embed, AnnouncementEmbed},
    service::fanout::{AnnouncementSink, FanoutMode, FanoutProgress, ProgressReporter},
};

/// Posts and edits announcement embeds through the Discord REST API.
pub struct DiscordAnnouncementSink {
    http: Arc<Http>,
}

impl DiscordAnnouncementSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AnnouncementSink for DiscordAnnouncementSink {
    async fn post_message(
        &self,
        channel_id: u64,
        embed: &AnnouncementEmbed,
    ) -> Result<u64, DeliveryError> {
        let channel = ChannelId::new(channel_id)
            .to_channel(&self.http)
            .await
            .map_err(|err| DeliveryError::from_serenity(&err))?;

        let Channel::Guild(channel) = channel else {
            return Err(DeliveryError::NotGuildChannel);
        };

        let message = channel
            .send_message(&self.http, CreateMessage::new().embed(embed.to_create_embed()))
            .await
            .map_err(|err| DeliveryError::from_serenity(&err))?;

        Ok(message.id.get())
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        embed: &AnnouncementEmbed,
    ) -> Result<(), DeliveryError> {
        ChannelId::new(channel_id)
            .edit_message(
                &self.http,
                MessageId::new(message_id),
                EditMessage::new().embed(embed.to_create_embed()),
            )
            .await
            .map_err(|err| DeliveryError::from_serenity(&err))?;

        Ok(())
    }
}

/// Edits a status message in place with the latest progress.
pub struct DiscordProgressReporter {
    http: Arc<Http>,
    channel_id: ChannelId,
    message_id: MessageId,
    title: String,
}

impl DiscordProgressReporter {
    /// # Arguments
    /// - `channel_id`, `message_id` - The status message to keep editing
    /// - `title` - Embed title, for example the announcement name
    pub fn new(http: Arc<Http>, channel_id: ChannelId, message_id: MessageId, title: String) -> Self {
        Self {
            http,
            channel_id,
            message_id,
            title,
        }
    }
}

#[async_trait]
impl ProgressReporter for DiscordProgressReporter {
    async fn report(&self, progress: &FanoutProgress) {
        let footer = match (progress.is_done(), progress.mode) {
            (false, _) => "In progress",
            (true, FanoutMode::Post) => "Announcement sent",
            (true, FanoutMode::Edit) => "Correction finished",
        };
        let embed = progress_embed(&self.title, &progress.fields(), footer);

        if let Err(e) = self
            .channel_id
            .edit_message(&self.http, self.message_id, EditMessage::new().embed(embed))
            .await
        {
            tracing::warn!("Failed to update progress message: {}", e);
        }
    }
}
