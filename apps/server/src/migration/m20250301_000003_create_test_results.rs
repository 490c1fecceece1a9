//! Create test_results table.

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_projects::Project;
use super::m20250301_000002_create_report_files::ReportFile;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestResult::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestResult::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TestResult::ProjectId).integer().not_null())
                    .col(ColumnDef::new(TestResult::ReportFileId).integer().null())
                    .col(ColumnDef::new(TestResult::TestName).text().not_null())
                    .col(ColumnDef::new(TestResult::FilePath).string().not_null())
                    .col(ColumnDef::new(TestResult::ProjectName).string().not_null())
                    .col(ColumnDef::new(TestResult::Status).string().not_null())
                    .col(
                        ColumnDef::new(TestResult::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TestResult::Duration).big_integer().null())
                    .col(ColumnDef::new(TestResult::RawOutput).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_results_project")
                            .from(TestResult::Table, TestResult::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_results_report_file")
                            .from(TestResult::Table, TestResult::ReportFileId)
                            .to(ReportFile::Table, ReportFile::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_results_project")
                    .table(TestResult::Table)
                    .col(TestResult::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_results_report_file")
                    .table(TestResult::Table)
                    .col(TestResult::ReportFileId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_results_timestamp")
                    .table(TestResult::Table)
                    .col(TestResult::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestResult::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TestResult {
    #[sea_orm(iden = "test_results")]
    Table,
    Id,
    ProjectId,
    ReportFileId,
    TestName,
    FilePath,
    ProjectName,
    Status,
    Timestamp,
    Duration,
    RawOutput,
}
