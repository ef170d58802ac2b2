use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HuntCadence::Table)
                    .if_not_exists()
                    .col(string(HuntCadence::UserId).primary_key())
                    .col(text(HuntCadence::Deltas))
                    .col(timestamp(HuntCadence::LastHuntAt))
                    .col(big_integer(HuntCadence::HuntCount).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HuntCadence::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum HuntCadence {
    Table,
    UserId,
    Deltas,
    LastHuntAt,
    HuntCount,
}
