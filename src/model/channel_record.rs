//! Domain models for per-channel autopost subscriptions.

use crate::{
    error::AppError,
    model::announcement::AnnouncementKind,
    util::parse::{parse_optional_u64, parse_u64_from_string},
};

/// A channel subscribed to one announcement kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelRecord {
    /// Surrogate key; ascending order is insertion order.
    pub id: i32,
    pub channel_id: u64,
    pub server_id: u64,
    pub kind: AnnouncementKind,
    /// Last announcement posted in the channel, `None` if never posted.
    pub last_message_id: Option<u64>,
    pub enabled: bool,
}

impl ChannelRecord {
    /// Converts an entity model to a channel record at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(ChannelRecord)` - Converted record
    /// - `Err(AppError::InternalErr)` - A stored snowflake or type is corrupt
    pub fn from_entity(entity: entity::channel_record::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            server_id: parse_u64_from_string(entity.server_id)?,
            kind: AnnouncementKind::from_db(&entity.announcement_type)?,
            last_message_id: parse_optional_u64(entity.last_message_id)?,
            enabled: entity.enabled,
        })
    }
}

/// Mutations produced by a fan-out batch, committed together at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelBatchUpdate {
    /// `(record id, new last message id)` for every successful post.
    pub last_messages: Vec<(i32, u64)>,
    /// Record ids to disable.
    pub disabled: Vec<i32>,
}

impl ChannelBatchUpdate {
    pub fn is_empty(&self) -> bool {
        self.last_messages.is_empty() && self.disabled.is_empty()
    }
}
