use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PointsBalance::Table)
                    .if_not_exists()
                    .col(string(PointsBalance::UserId).primary_key())
                    .col(big_integer(PointsBalance::Points).default(0))
                    .col(timestamp(PointsBalance::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PointsBalance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PointsBalance {
    Table,
    UserId,
    Points,
    UpdatedAt,
}
