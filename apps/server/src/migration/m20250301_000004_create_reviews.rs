//! Create reviews table.
//!
//! The unique index on test_result_id is what the review upsert conflicts on.

use sea_orm_migration::prelude::*;

use super::m20250301_000003_create_test_results::TestResult;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Review::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Review::TestResultId).integer().not_null())
                    .col(ColumnDef::new(Review::Reason).string().not_null())
                    .col(ColumnDef::new(Review::Comments).text().null())
                    .col(ColumnDef::new(Review::QaId).integer().not_null())
                    .col(
                        ColumnDef::new(Review::ReviewedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_test_result")
                            .from(Review::Table, Review::TestResultId)
                            .to(TestResult::Table, TestResult::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_test_result_unique")
                    .table(Review::Table)
                    .col(Review::TestResultId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_reviewed_at")
                    .table(Review::Table)
                    .col(Review::ReviewedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Review {
    #[sea_orm(iden = "reviews")]
    Table,
    Id,
    TestResultId,
    Reason,
    Comments,
    QaId,
    ReviewedAt,
}
