//! Review entity for SeaORM.
//!
//! `test_result_id` carries a unique index: at most one review per result.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub test_result_id: i32,
    pub reason: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
    pub qa_id: i32,
    pub reviewed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::test_result::Entity",
        from = "Column::TestResultId",
        to = "super::test_result::Column::Id"
    )]
    TestResult,
}

impl Related<super::test_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestResult.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
