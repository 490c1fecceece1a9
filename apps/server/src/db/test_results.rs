//! Database queries for test results.

use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Set,
};

use crate::entity::test_result::{self, ActiveModel, Entity as TestResult};
use crate::entity::{review, test_result::Column};
use crate::error::{AppError, AppResult};
use crate::models::NewTestResult;

use super::DbPool;

/// Rows per INSERT statement when persisting a batch.
pub const INSERT_CHUNK_SIZE: usize = 500;

fn to_active_model(row: &NewTestResult, report_file_id: Option<i32>) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        project_id: Set(row.project_id),
        report_file_id: Set(report_file_id),
        test_name: Set(row.test_name.clone()),
        file_path: Set(row.file_path.clone()),
        project_name: Set(row.project_name.clone()),
        status: Set(row.status.clone()),
        timestamp: Set(row.timestamp),
        duration: Set(row.duration),
        raw_output: Set(Some(row.raw_output.clone())),
    }
}

/// Insert a batch of normalized results, tagged with the given report file.
///
/// Atomicity is the caller's: pass a transaction to make the batch all-or-nothing.
pub async fn insert_batch<C: ConnectionTrait>(
    db: &C,
    report_file_id: Option<i32>,
    rows: &[NewTestResult],
) -> AppResult<u64> {
    let mut inserted = 0;

    for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
        let models = chunk.iter().map(|r| to_active_model(r, report_file_id));

        inserted += TestResult::insert_many(models)
            .exec_without_returning(db)
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert test results: {}", e)))?;
    }

    Ok(inserted)
}

/// Delete every result of a project together with their reviews.
///
/// Returns `(reviews_deleted, results_deleted)`.
pub async fn delete_project_results<C: ConnectionTrait>(
    db: &C,
    project_id: i32,
) -> AppResult<(u64, u64)> {
    let project_results = TestResult::find()
        .select_only()
        .column(Column::Id)
        .filter(Column::ProjectId.eq(project_id))
        .into_query();

    let reviews = review::Entity::delete_many()
        .filter(review::Column::TestResultId.in_subquery(project_results))
        .exec(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to delete reviews: {}", e)))?
        .rows_affected;

    let results = TestResult::delete_many()
        .filter(Column::ProjectId.eq(project_id))
        .exec(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to delete test results: {}", e)))?
        .rows_affected;

    Ok((reviews, results))
}

impl DbPool {
    /// Get a test result by ID.
    pub async fn get_test_result(&self, id: i32) -> AppResult<Option<test_result::Model>> {
        let result = TestResult::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test result: {}", e)))?;

        Ok(result)
    }

    /// Get a test result together with its review.
    pub async fn get_test_result_with_review(
        &self,
        id: i32,
    ) -> AppResult<Option<(test_result::Model, Option<review::Model>)>> {
        let result = TestResult::find_by_id(id)
            .find_also_related(review::Entity)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test result: {}", e)))?;

        Ok(result)
    }

    /// List a project's results, newest first, each with its review if any.
    pub async fn list_project_results(
        &self,
        project_id: i32,
        status: Option<&str>,
        report_file_id: Option<i32>,
    ) -> AppResult<Vec<(test_result::Model, Option<review::Model>)>> {
        let mut select = TestResult::find().filter(Column::ProjectId.eq(project_id));

        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status));
        }

        if let Some(file_id) = report_file_id {
            select = select.filter(Column::ReportFileId.eq(file_id));
        }

        let results = select
            .order_by_desc(Column::Timestamp)
            .order_by_desc(Column::Id)
            .find_also_related(review::Entity)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list test results: {}", e)))?;

        Ok(results)
    }

    /// Count results attached to a report file.
    pub async fn count_results_for_file(&self, report_file_id: i32) -> AppResult<u64> {
        use sea_orm::PaginatorTrait;

        TestResult::find()
            .filter(Column::ReportFileId.eq(report_file_id))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count test results: {}", e)))
    }
}
