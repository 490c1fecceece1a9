//! Aggregation filters and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::DateRange;

/// Filter shared by the status and review-reason summaries.
///
/// Empty id lists mean "no restriction".
#[derive(Debug, Clone, Default)]
pub struct SummaryFilter {
    pub project_ids: Vec<i32>,
    pub report_file_ids: Vec<i32>,
    pub range: DateRange,
}

/// Result count for one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Review count for one reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReasonCount {
    pub reason: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusSummaryResponse {
    pub summary: Vec<StatusCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReasonSummaryResponse {
    pub reasons: Vec<ReasonCount>,
}
