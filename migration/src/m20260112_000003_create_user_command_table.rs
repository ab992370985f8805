use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserCommand::Table)
                    .if_not_exists()
                    .col(string(UserCommand::Name).primary_key())
                    .col(string(UserCommand::Description))
                    .col(text(UserCommand::Response))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserCommand::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserCommand {
    Table,
    Name,
    Description,
    Response,
}
