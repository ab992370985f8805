//! Announcement settings fixtures for creating in-memory test data.

use chrono::{DateTime, Utc};
use entity::post_settings;

/// Default announcement type.
pub const DEFAULT_ANNOUNCEMENT_TYPE: &str = "daily";

/// Default infographic URL.
pub const DEFAULT_URL: &str = "https://example.com/daily";

/// Default title link.
pub const DEFAULT_POST_URL: &str = "https://example.com/daily-post";

/// Creates a settings entity model with default values.
///
/// # Default Values
/// - announcement_type: `"daily"`
/// - id: `0`
/// - url: `"https://example.com/daily"`
/// - post_url: `"https://example.com/daily-post"`
/// - redirect_target, last_modified, last_checked: `None`
/// - watcher_armed: `false`
/// - autoannounce_enabled: `true`
pub fn entity() -> post_settings::Model {
    post_settings::Model {
        announcement_type: DEFAULT_ANNOUNCEMENT_TYPE.to_string(),
        id: 0,
        url: DEFAULT_URL.to_string(),
        post_url: DEFAULT_POST_URL.to_string(),
        redirect_target: None,
        last_modified: None,
        last_checked: None,
        watcher_armed: false,
        autoannounce_enabled: true,
    }
}

/// Creates a settings entity builder for customization.
pub fn entity_builder() -> PostSettingsEntityBuilder {
    PostSettingsEntityBuilder { entity: entity() }
}

/// Builder for settings entity models.
pub struct PostSettingsEntityBuilder {
    entity: post_settings::Model,
}

impl PostSettingsEntityBuilder {
    pub fn announcement_type(mut self, announcement_type: impl Into<String>) -> Self {
        self.entity.announcement_type = announcement_type.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.entity.url = url.into();
        self
    }

    pub fn post_url(mut self, post_url: impl Into<String>) -> Self {
        self.entity.post_url = post_url.into();
        self
    }

    /// Sets the stored redirect target and the time it was last seen changing.
    pub fn redirect_target(mut self, target: impl Into<String>, modified: DateTime<Utc>) -> Self {
        self.entity.redirect_target = Some(target.into());
        self.entity.last_modified = Some(modified);
        self.entity.last_checked = Some(modified);
        self
    }

    pub fn watcher_armed(mut self, armed: bool) -> Self {
        self.entity.watcher_armed = armed;
        self
    }

    pub fn autoannounce_enabled(mut self, enabled: bool) -> Self {
        self.entity.autoannounce_enabled = enabled;
        self
    }

    pub fn build(self) -> post_settings::Model {
        self.entity
    }
}
