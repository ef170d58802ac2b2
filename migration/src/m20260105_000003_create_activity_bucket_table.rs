use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityBucket::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityBucket::Id))
                    .col(string(ActivityBucket::GuildId))
                    .col(string(ActivityBucket::UserId))
                    .col(timestamp(ActivityBucket::Hour))
                    .col(text(ActivityBucket::Counts))
                    .to_owned(),
            )
            .await?;

        // One bucket per member per hour
        manager
            .create_index(
                Index::create()
                    .name("idx_activity_bucket_subject_hour")
                    .table(ActivityBucket::Table)
                    .col(ActivityBucket::GuildId)
                    .col(ActivityBucket::UserId)
                    .col(ActivityBucket::Hour)
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
                    .name("idx_activity_bucket_subject_hour")
                    .table(ActivityBucket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ActivityBucket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActivityBucket {
    Table,
    Id,
    GuildId,
    UserId,
    Hour,
    Counts,
}
