use sea_orm::entity::prelude::*;

/// Timing history used to flag suspiciously regular hunting.
///
/// `deltas` holds a JSON array of seconds between consecutive confirmed hunts.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "hunt_cadence")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(column_type = "Text")]
    pub deltas: String,
    pub last_hunt_at: DateTimeUtc,
    pub hunt_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
