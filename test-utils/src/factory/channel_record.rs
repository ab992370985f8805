//! Channel record factory for creating test subscriptions.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::{factory::helpers::next_snowflake, fixture};

/// Factory for creating channel records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let record = ChannelRecordFactory::new(&db)
///     .announcement_type("weekend")
///     .enabled(false)
///     .build()
///     .await?;
/// ```
pub struct ChannelRecordFactory<'a> {
    db: &'a DatabaseConnection,
    entity: entity::channel_record::Model,
}

impl<'a> ChannelRecordFactory<'a> {
    /// Creates a new factory with a unique channel ID and fixture defaults.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let entity = fixture::channel_record::entity_builder()
            .channel_id(next_snowflake().to_string())
            .build();

        Self { db, entity }
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

    pub fn last_message_id(mut self, last_message_id: impl Into<String>) -> Self {
        self.entity.last_message_id = Some(last_message_id.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.entity.enabled = enabled;
        self
    }

    /// Inserts the record, letting the database assign the id.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created record
    /// - `Err(DbErr)` - Database error during insertion
    pub async fn build(self) -> Result<entity::channel_record::Model, DbErr> {
        entity::channel_record::ActiveModel {
            channel_id: ActiveValue::Set(self.entity.channel_id),
            server_id: ActiveValue::Set(self.entity.server_id),
            announcement_type: ActiveValue::Set(self.entity.announcement_type),
            last_message_id: ActiveValue::Set(self.entity.last_message_id),
            enabled: ActiveValue::Set(self.entity.enabled),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an enabled channel record for `announcement_type` with defaults.
pub async fn create_channel_record(
    db: &DatabaseConnection,
    announcement_type: &str,
) -> Result<entity::channel_record::Model, DbErr> {
    ChannelRecordFactory::new(db)
        .announcement_type(announcement_type)
        .build()
        .await
}
