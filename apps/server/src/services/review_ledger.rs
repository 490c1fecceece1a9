//! Review ledger: at most one review per test result, written by upsert.

use tracing::info;

use crate::db::DbPool;
use crate::entity::review;
use crate::error::{AppError, AppResult};
use crate::models::UpsertReviewRequest;

/// Create or replace the review of a test result.
///
/// Submitting the same payload twice leaves the same state; only
/// `reviewed_at` moves forward.
pub async fn upsert_review(
    pool: &DbPool,
    test_result_id: i32,
    request: &UpsertReviewRequest,
) -> AppResult<review::Model> {
    let input = request.validate(Some(test_result_id))?;

    if pool.get_test_result(test_result_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Test result {}", test_result_id)));
    }

    let review = pool.upsert_review(&input).await?;

    info!(
        test_result_id,
        review_id = review.id,
        reason = %input.reason,
        qa_id = input.qa_id,
        "Review recorded"
    );

    Ok(review)
}

/// Fetch the review of a test result.
pub async fn get_review(pool: &DbPool, test_result_id: i32) -> AppResult<review::Model> {
    pool.get_review_by_test_result(test_result_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review for test result {}", test_result_id)))
}
