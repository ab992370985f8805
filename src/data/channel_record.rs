//! Channel subscription repository.
//!
//! Channels subscribe to one announcement kind each. Disabled records are kept so
//! that re-enabling a channel can still correct the message it posted last.

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    error::AppError,
    model::{
        announcement::AnnouncementKind,
        channel_record::{ChannelBatchUpdate, ChannelRecord},
    },
};

use entity::channel_record::{ActiveModel, Column};

pub struct ChannelRecordRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChannelRecordRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the subscription of a channel to a kind, enabled or not.
    pub async fn find(
        &self,
        channel_id: u64,
        kind: AnnouncementKind,
    ) -> Result<Option<ChannelRecord>, AppError> {
        entity::prelude::ChannelRecord::find()
            .filter(Column::ChannelId.eq(channel_id.to_string()))
            .filter(Column::AnnouncementType.eq(kind.as_str()))
            .one(self.db)
            .await?
            .map(ChannelRecord::from_entity)
            .transpose()
    }

    /// Subscribes a channel to a kind.
    ///
    /// Re-enables an existing record, keeping its `last_message_id`, or inserts a
    /// new one.
    ///
    /// # Returns
    /// - `Ok(ChannelRecord)` - The enabled subscription
    /// - `Err(AppError)` - Database error
    pub async fn enable(
        &self,
        channel_id: u64,
        server_id: u64,
        kind: AnnouncementKind,
    ) -> Result<ChannelRecord, AppError> {
        let existing = entity::prelude::ChannelRecord::find()
            .filter(Column::ChannelId.eq(channel_id.to_string()))
            .filter(Column::AnnouncementType.eq(kind.as_str()))
            .one(self.db)
            .await?;

        let model = match existing {
            Some(record) => {
                let mut active: ActiveModel = record.into();
                active.server_id = ActiveValue::Set(server_id.to_string());
                active.enabled = ActiveValue::Set(true);
                active.update(self.db).await?
            }
            None => {
                ActiveModel {
                    channel_id: ActiveValue::Set(channel_id.to_string()),
                    server_id: ActiveValue::Set(server_id.to_string()),
                    announcement_type: ActiveValue::Set(kind.as_str().to_string()),
                    last_message_id: ActiveValue::Set(None),
                    enabled: ActiveValue::Set(true),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        ChannelRecord::from_entity(model)
    }

    /// Unsubscribes a channel from a kind.
    ///
    /// # Returns
    /// - `Ok(Some(ChannelRecord))` - The now disabled subscription
    /// - `Ok(None)` - The channel was never subscribed
    pub async fn disable(
        &self,
        channel_id: u64,
        kind: AnnouncementKind,
    ) -> Result<Option<ChannelRecord>, AppError> {
        let Some(record) = entity::prelude::ChannelRecord::find()
            .filter(Column::ChannelId.eq(channel_id.to_string()))
            .filter(Column::AnnouncementType.eq(kind.as_str()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: ActiveModel = record.into();
        active.enabled = ActiveValue::Set(false);
        let model = active.update(self.db).await?;

        Ok(Some(ChannelRecord::from_entity(model)?))
    }

    /// Gets every enabled subscription for a kind in insertion order.
    pub async fn get_enabled(&self, kind: AnnouncementKind) -> Result<Vec<ChannelRecord>, AppError> {
        entity::prelude::ChannelRecord::find()
            .filter(Column::AnnouncementType.eq(kind.as_str()))
            .filter(Column::Enabled.eq(true))
            .order_by_asc(Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(ChannelRecord::from_entity)
            .collect()
    }

    /// Number of channels currently subscribed to `kind`.
    pub async fn count_enabled(&self, kind: AnnouncementKind) -> Result<u64, AppError> {
        let count = entity::prelude::ChannelRecord::find()
            .filter(Column::AnnouncementType.eq(kind.as_str()))
            .filter(Column::Enabled.eq(true))
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Commits the mutations of a fan-out batch in a single transaction.
    ///
    /// Either every new `last_message_id` and every disable is persisted, or none is.
    pub async fn apply_batch(&self, update: &ChannelBatchUpdate) -> Result<(), AppError> {
        if update.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await?;

        for (id, message_id) in &update.last_messages {
            entity::prelude::ChannelRecord::update_many()
                .col_expr(Column::LastMessageId, Expr::value(message_id.to_string()))
                .filter(Column::Id.eq(*id))
                .exec(&txn)
                .await?;
        }

        if !update.disabled.is_empty() {
            entity::prelude::ChannelRecord::update_many()
                .col_expr(Column::Enabled, Expr::value(false))
                .filter(Column::Id.is_in(update.disabled.iter().copied()))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        Ok(())
    }
}
