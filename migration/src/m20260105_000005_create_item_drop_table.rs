use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemDrop::Table)
                    .if_not_exists()
                    .col(pk_auto(ItemDrop::Id))
                    .col(string(ItemDrop::GuildId))
                    .col(string(ItemDrop::UserId))
                    .col(timestamp(ItemDrop::Hour))
                    .col(string(ItemDrop::Item))
                    .col(big_integer(ItemDrop::Count).default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_item_drop_subject_hour_item")
                    .table(ItemDrop::Table)
                    .col(ItemDrop::GuildId)
                    .col(ItemDrop::UserId)
                    .col(ItemDrop::Hour)
                    .col(ItemDrop::Item)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_item_drop_subject_hour_item")
                    .table(ItemDrop::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ItemDrop::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ItemDrop {
    Table,
    Id,
    GuildId,
    UserId,
    Hour,
    Item,
    Count,
}
