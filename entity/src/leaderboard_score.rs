use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leaderboard_score")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub board: String,
    pub guild_id: String,
    pub user_id: String,
    pub score: i64,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
