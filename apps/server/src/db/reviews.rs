//! Database queries for reviews.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::entity::review::{self, ActiveModel, Column, Entity as Review};
use crate::error::{AppError, AppResult};
use crate::models::ValidatedReview;

use super::DbPool;

impl DbPool {
    /// Create or replace the review of a test result.
    ///
    /// A single `INSERT ... ON CONFLICT (test_result_id) DO UPDATE`, so two
    /// writers racing on the same result both succeed and the last one wins.
    pub async fn upsert_review(&self, input: &ValidatedReview) -> AppResult<review::Model> {
        let model = ActiveModel {
            id: NotSet,
            test_result_id: Set(input.test_result_id),
            reason: Set(input.reason.as_str().to_string()),
            comments: Set(input.comments.clone()),
            qa_id: Set(input.qa_id),
            reviewed_at: Set(Utc::now()),
        };

        Review::insert(model)
            .on_conflict(
                OnConflict::column(Column::TestResultId)
                    .update_columns([
                        Column::Reason,
                        Column::Comments,
                        Column::QaId,
                        Column::ReviewedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to upsert review: {}", e)))?;

        self.get_review_by_test_result(input.test_result_id)
            .await?
            .ok_or_else(|| AppError::Database("Review missing after upsert".to_string()))
    }

    /// Get the review attached to a test result.
    pub async fn get_review_by_test_result(
        &self,
        test_result_id: i32,
    ) -> AppResult<Option<review::Model>> {
        let result = Review::find()
            .filter(Column::TestResultId.eq(test_result_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get review: {}", e)))?;

        Ok(result)
    }
}
