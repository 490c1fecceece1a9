//! TestResult entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "test_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub project_id: i32,
    /// Absent for results ingested without file grouping.
    pub report_file_id: Option<i32>,
    pub test_name: String,
    pub file_path: String,
    pub project_name: String,
    pub status: String,
    pub timestamp: DateTimeUtc,
    pub duration: Option<i64>,
    /// JSON-encoded list of stdout lines.
    #[sea_orm(column_type = "Text", nullable)]
    pub raw_output: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::report_file::Entity",
        from = "Column::ReportFileId",
        to = "super::report_file::Column::Id"
    )]
    ReportFile,
    #[sea_orm(has_one = "super::review::Entity")]
    Review,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::report_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReportFile.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
