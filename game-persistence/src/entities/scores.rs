use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub player: String,
    pub won: bool,
    pub word: Option<String>,
    pub word_length: i32,
    pub mistakes: i32,
    pub correct: i32,
    #[sea_orm(column_type = "Double")]
    pub accuracy: f64,
    pub duration_ms: i64,
    pub score: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
