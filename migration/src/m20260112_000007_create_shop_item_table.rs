use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShopItem::Table)
                    .if_not_exists()
                    .col(pk_auto(ShopItem::Id))
                    .col(string_uniq(ShopItem::Name))
                    .col(big_integer(ShopItem::Price))
                    .col(timestamp(ShopItem::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShopItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShopItem {
    Table,
    Id,
    Name,
    Price,
    CreatedAt,
}
