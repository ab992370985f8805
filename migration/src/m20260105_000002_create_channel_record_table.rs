use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChannelRecord::Table)
                    .if_not_exists()
                    .col(pk_auto(ChannelRecord::Id))
                    .col(string(ChannelRecord::ChannelId))
                    .col(string(ChannelRecord::ServerId))
                    .col(string(ChannelRecord::AnnouncementType))
                    .col(string_null(ChannelRecord::LastMessageId))
                    .col(boolean(ChannelRecord::Enabled).default(true))
                    .to_owned(),
            )
            .await?;

        // One subscription per channel per announcement type
        manager
            .create_index(
                Index::create()
                    .name("idx_channel_record_channel_type")
                    .table(ChannelRecord::Table)
                    .col(ChannelRecord::ChannelId)
                    .col(ChannelRecord::AnnouncementType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_channel_record_type_enabled")
                    .table(ChannelRecord::Table)
                    .col(ChannelRecord::AnnouncementType)
                    .col(ChannelRecord::Enabled)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_channel_record_type_enabled")
                    .table(ChannelRecord::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_channel_record_channel_type")
                    .table(ChannelRecord::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ChannelRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ChannelRecord {
    Table,
    Id,
    ChannelId,
    ServerId,
    AnnouncementType,
    LastMessageId,
    Enabled,
}
