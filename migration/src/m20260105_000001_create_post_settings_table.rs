use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostSettings::Table)
                    .if_not_exists()
                    .col(string(PostSettings::AnnouncementType))
                    .col(integer(PostSettings::Id))
                    .col(string(PostSettings::Url))
                    .col(string(PostSettings::PostUrl))
                    .col(string_null(PostSettings::RedirectTarget))
                    .col(timestamp_with_time_zone_null(PostSettings::LastModified))
                    .col(timestamp_with_time_zone_null(PostSettings::LastChecked))
                    .col(boolean(PostSettings::WatcherArmed).default(false))
                    .col(boolean(PostSettings::AutoannounceEnabled).default(true))
                    .primary_key(
                        Index::create()
                            .col(PostSettings::AnnouncementType)
                            .col(PostSettings::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PostSettings {
    Table,
    AnnouncementType,
    Id,
    Url,
    PostUrl,
    RedirectTarget,
    LastModified,
    LastChecked,
    WatcherArmed,
    AutoannounceEnabled,
}
