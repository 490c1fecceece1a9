//! Grouped-count queries backing the summary endpoints.

use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait, Select,
};

use crate::entity::{review, test_result};
use crate::error::AggregationError;
use crate::models::SummaryFilter;

use super::DbPool;

/// Apply the project / report-file `IN` filters, skipping empty lists.
fn filter_by_owner<E: EntityTrait>(mut select: Select<E>, filter: &SummaryFilter) -> Select<E> {
    if !filter.project_ids.is_empty() {
        select = select.filter(test_result::Column::ProjectId.is_in(filter.project_ids.clone()));
    }

    if !filter.report_file_ids.is_empty() {
        select = select.filter(
            test_result::Column::ReportFileId.is_in(filter.report_file_ids.clone()),
        );
    }

    select
}

impl DbPool {
    /// Count test results per status. The date range applies to the result timestamp.
    pub async fn count_results_by_status(
        &self,
        filter: &SummaryFilter,
    ) -> Result<Vec<(String, i64)>, AggregationError> {
        let mut select = filter_by_owner(test_result::Entity::find(), filter);

        if let Some(from) = filter.range.from {
            select = select.filter(test_result::Column::Timestamp.gte(from));
        }

        if let Some(until) = filter.range.until {
            select = select.filter(test_result::Column::Timestamp.lt(until));
        }

        let rows = select
            .select_only()
            .column(test_result::Column::Status)
            .column_as(test_result::Column::Id.count(), "count")
            .group_by(test_result::Column::Status)
            .into_tuple::<(String, i64)>()
            .all(self.connection())
            .await?;

        Ok(rows)
    }

    /// Count reviews per reason. Project and file filters go through the
    /// owning result; the date range applies to `reviewed_at`.
    pub async fn count_reviews_by_reason(
        &self,
        filter: &SummaryFilter,
    ) -> Result<Vec<(String, i64)>, AggregationError> {
        let mut select = review::Entity::find()
            .join(JoinType::InnerJoin, review::Relation::TestResult.def());
        select = filter_by_owner(select, filter);

        if let Some(from) = filter.range.from {
            select = select.filter(review::Column::ReviewedAt.gte(from));
        }

        if let Some(until) = filter.range.until {
            select = select.filter(review::Column::ReviewedAt.lt(until));
        }

        let rows = select
            .select_only()
            .column(review::Column::Reason)
            .column_as(review::Column::Id.count(), "count")
            .group_by(review::Column::Reason)
            .into_tuple::<(String, i64)>()
            .all(self.connection())
            .await?;

        Ok(rows)
    }
}
