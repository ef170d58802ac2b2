use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeaderboardScore::Table)
                    .if_not_exists()
                    .col(pk_auto(LeaderboardScore::Id))
                    .col(string(LeaderboardScore::Board))
                    .col(string(LeaderboardScore::GuildId))
                    .col(string(LeaderboardScore::UserId))
                    .col(big_integer(LeaderboardScore::Score).default(0))
                    .col(timestamp(LeaderboardScore::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leaderboard_score_board_subject")
                    .table(LeaderboardScore::Table)
                    .col(LeaderboardScore::Board)
                    .col(LeaderboardScore::GuildId)
                    .col(LeaderboardScore::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Ranking scans
        manager
            .create_index(
                Index::create()
                    .name("idx_leaderboard_score_board_score")
                    .table(LeaderboardScore::Table)
                    .col(LeaderboardScore::Board)
                    .col(LeaderboardScore::Score)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_leaderboard_score_board_score")
                    .table(LeaderboardScore::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_leaderboard_score_board_subject")
                    .table(LeaderboardScore::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LeaderboardScore::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LeaderboardScore {
    Table,
    Id,
    Board,
    GuildId,
    UserId,
    Score,
    UpdatedAt,
}
