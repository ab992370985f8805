//! Settings factory for creating test settings rows.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::fixture;

/// Factory for creating settings rows with customizable fields.
pub struct PostSettingsFactory<'a> {
    db: &'a DatabaseConnection,
    builder: fixture::post_settings::PostSettingsEntityBuilder,
}

impl<'a> PostSettingsFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            builder: fixture::post_settings::entity_builder(),
        }
    }

    pub fn announcement_type(mut self, announcement_type: impl Into<String>) -> Self {
        self.builder = self.builder.announcement_type(announcement_type);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.builder = self.builder.url(url);
        self
    }

    pub fn redirect_target(mut self, target: impl Into<String>, modified: DateTime<Utc>) -> Self {
        self.builder = self.builder.redirect_target(target, modified);
        self
    }

    pub fn watcher_armed(mut self, armed: bool) -> Self {
        self.builder = self.builder.watcher_armed(armed);
        self
    }

    pub fn autoannounce_enabled(mut self, enabled: bool) -> Self {
        self.builder = self.builder.autoannounce_enabled(enabled);
        self
    }

    /// Inserts the settings row.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created row
    /// - `Err(DbErr)` - Database error, including a duplicate announcement type
    pub async fn build(self) -> Result<entity::post_settings::Model, DbErr> {
        let model = self.builder.build();

        entity::post_settings::ActiveModel {
            announcement_type: ActiveValue::Set(model.announcement_type),
            id: ActiveValue::Set(model.id),
            url: ActiveValue::Set(model.url),
            post_url: ActiveValue::Set(model.post_url),
            redirect_target: ActiveValue::Set(model.redirect_target),
            last_modified: ActiveValue::Set(model.last_modified),
            last_checked: ActiveValue::Set(model.last_checked),
            watcher_armed: ActiveValue::Set(model.watcher_armed),
            autoannounce_enabled: ActiveValue::Set(model.autoannounce_enabled),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a settings row for `announcement_type` with fixture defaults.
pub async fn create_post_settings(
    db: &DatabaseConnection,
    announcement_type: &str,
) -> Result<entity::post_settings::Model, DbErr> {
    PostSettingsFactory::new(db)
        .announcement_type(announcement_type)
        .build()
        .await
}
