use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrackedGuild::Table)
                    .if_not_exists()
                    .col(string(TrackedGuild::GuildId).primary_key())
                    .col(timestamp(TrackedGuild::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrackedGuild::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TrackedGuild {
    Table,
    GuildId,
    CreatedAt,
}
