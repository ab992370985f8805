//! Domain models for announcement settings rows.

use chrono::{DateTime, Utc};

use crate::{error::AppError, model::announcement::AnnouncementKind};

/// The row id every settings record uses; there is one row per kind.
pub const SETTINGS_ROW_ID: i32 = 0;

/// Singleton settings for one announcement kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSettings {
    pub kind: AnnouncementKind,
    /// Infographic URL that is polled for changes.
    pub url: String,
    /// Hyperlink target for the embed title.
    pub post_url: String,
    /// Last URL the infographic link redirected to.
    pub redirect_target: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub last_checked: Option<DateTime<Utc>>,
    /// A watch loop currently owns this row.
    pub watcher_armed: bool,
    pub autoannounce_enabled: bool,
}

impl PostSettings {
    /// Converts an entity model to a settings domain model at the repository boundary.
    pub fn from_entity(entity: entity::post_settings::Model) -> Result<Self, AppError> {
        Ok(Self {
            kind: AnnouncementKind::from_db(&entity.announcement_type)?,
            url: entity.url,
            post_url: entity.post_url,
            redirect_target: entity.redirect_target,
            last_modified: entity.last_modified,
            last_checked: entity.last_checked,
            watcher_armed: entity.watcher_armed,
            autoannounce_enabled: entity.autoannounce_enabled,
        })
    }
}

/// Values used when a settings row is created on first access.
#[derive(Debug, Clone)]
pub struct PostSettingsDefaults {
    pub url: String,
    pub post_url: String,
    pub autoannounce_enabled: bool,
}

impl PostSettingsDefaults {
    /// Defaults taken from the kind's profile.
    pub fn for_kind(kind: AnnouncementKind) -> Self {
        let profile = kind.profile();
        Self {
            url: profile.default_gfx_url.to_string(),
            post_url: profile.default_post_url.to_string(),
            autoannounce_enabled: true,
        }
    }
}

/// Result of a single poll of the infographic link.
#[derive(Debug, Clone)]
pub struct UrlCheck {
    pub settings: PostSettings,
    /// The redirect target differs from what was stored before this check.
    pub changed: bool,
}
