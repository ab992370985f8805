//! Channel record fixtures for creating in-memory test data.

use entity::channel_record;

/// Default test channel ID.
pub const DEFAULT_CHANNEL_ID: &str = "111111111111111111";

/// Default test server ID.
pub const DEFAULT_SERVER_ID: &str = "222222222222222222";

/// Default announcement type.
pub const DEFAULT_ANNOUNCEMENT_TYPE: &str = "daily";

/// Creates a channel record entity model with default values.
///
/// # Default Values
/// - id: `1`
/// - channel_id: `"111111111111111111"`
/// - server_id: `"222222222222222222"`
/// - announcement_type: `"daily"`
/// - last_message_id: `None`
/// - enabled: `true`
pub fn entity() -> channel_record::Model {
    channel_record::Model {
        id: 1,
        channel_id: DEFAULT_CHANNEL_ID.to_string(),
        server_id: DEFAULT_SERVER_ID.to_string(),
        announcement_type: DEFAULT_ANNOUNCEMENT_TYPE.to_string(),
        last_message_id: None,
        enabled: true,
    }
}

/// Creates a channel record entity builder for customization.
pub fn entity_builder() -> ChannelRecordEntityBuilder {
    ChannelRecordEntityBuilder { entity: entity() }
}

/// Builder for channel record entity models.
pub struct ChannelRecordEntityBuilder {
    entity: channel_record::Model,
}

impl ChannelRecordEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.entity.id = id;
        self
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.entity.channel_id = channel_id.into();
        self
    }

    pub fn server_id(mut self, server_id: impl Into<String>) -> Self {
        self.entity.server_id = server_id.into();
        self
    }

    pub fn announcement_type(mut self, announcement_type: impl Into<String>) -> Self {
        self.entity.announcement_type = announcement_type.into();
        self
    }

    pub fn last_message_id(mut self, last_message_id: Option<&str>) -> Self {
        self.entity.last_message_id = last_message_id.map(str::to_string);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.entity.enabled = enabled;
        self
    }

    pub fn build(self) -> channel_record::Model {
        self.entity
    }
}
