//! Aggregation engine: grouped counts over results and reviews.
//!
//! The two summaries filter on different clocks. Status counts use the
//! result's own `timestamp`; reason counts use the review's `reviewed_at`.

use tracing::warn;

use crate::db::DbPool;
use crate::error::AggregationError;
use crate::models::{ReasonCount, StatusCount, SummaryFilter};

/// Count results per status.
pub async fn summarize_status(
    pool: &DbPool,
    filter: &SummaryFilter,
) -> Result<Vec<StatusCount>, AggregationError> {
    let rows = pool
        .count_results_by_status(filter)
        .await
        .inspect_err(|e| warn!(error = %e, "Status summary query failed"))?;

    Ok(sorted_counts(rows)
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect())
}

/// Count reviews per reason.
pub async fn summarize_review_reasons(
    pool: &DbPool,
    filter: &SummaryFilter,
) -> Result<Vec<ReasonCount>, AggregationError> {
    let rows = pool
        .count_reviews_by_reason(filter)
        .await
        .inspect_err(|e| warn!(error = %e, "Review reason summary query failed"))?;

    Ok(sorted_counts(rows)
        .into_iter()
        .map(|(reason, count)| ReasonCount { reason, count })
        .collect())
}

/// Count descending, then key ascending.
fn sorted_counts(rows: Vec<(String, i64)>) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = rows
        .into_iter()
        .map(|(key, count)| (key, count.max(0) as u64))
        .collect();

    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
