use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildPrefix::Table)
                    .if_not_exists()
                    .col(string(GuildPrefix::GuildId).primary_key())
                    .col(string(GuildPrefix::Prefix))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildPrefix::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GuildPrefix {
    Table,
    GuildId,
    Prefix,
}
