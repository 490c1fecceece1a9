//! Create report_files table.

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_projects::Project;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReportFile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReportFile::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReportFile::ProjectId).integer().not_null())
                    .col(ColumnDef::new(ReportFile::Name).string().not_null())
                    .col(
                        ColumnDef::new(ReportFile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // No cascade: project deletion removes files explicitly, in order
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_files_project")
                            .from(ReportFile::Table, ReportFile::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_report_files_project_created")
                    .table(ReportFile::Table)
                    .col(ReportFile::ProjectId)
                    .col(ReportFile::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReportFile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReportFile {
    #[sea_orm(iden = "report_files")]
    Table,
    Id,
    ProjectId,
    Name,
    CreatedAt,
}
