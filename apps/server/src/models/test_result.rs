//! Test result DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::review::ReviewResponse;
use crate::entity::{review, test_result};

/// A flattened result produced by the report normalizer, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestResult {
    pub project_id: i32,
    pub test_name: String,
    pub file_path: String,
    pub project_name: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub duration: Option<i64>,
    /// JSON array of stdout lines, `"[]"` when there were none.
    pub raw_output: String,
}

/// Row in a project's result listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultListItem {
    pub id: i32,
    pub test_name: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Whether a review has been recorded for this result.
    pub reviewed: bool,
}

impl ResultListItem {
    pub fn new(model: test_result::Model, reviewed: bool) -> Self {
        ResultListItem {
            id: model.id,
            test_name: model.test_name,
            status: model.status,
            timestamp: model.timestamp,
            reviewed,
        }
    }
}

/// Full result with its review, if any.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestResultDetail {
    pub id: i32,
    pub project_id: i32,
    pub report_file_id: Option<i32>,
    pub test_name: String,
    pub file_path: String,
    pub project_name: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub duration: Option<i64>,
    pub raw_output: Option<String>,
    pub review: Option<ReviewResponse>,
}

impl TestResultDetail {
    pub fn new(model: test_result::Model, review: Option<review::Model>) -> Self {
        TestResultDetail {
            id: model.id,
            project_id: model.project_id,
            report_file_id: model.report_file_id,
            test_name: model.test_name,
            file_path: model.file_path,
            project_name: model.project_name,
            status: model.status,
            timestamp: model.timestamp,
            duration: model.duration,
            raw_output: model.raw_output,
            review: review.map(ReviewResponse::from),
        }
    }
}

/// Query parameters for a project's result listing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListResultsQuery {
    /// `all` (default) or a single status such as `failed`.
    pub status: Option<String>,
    /// Restrict to one report file.
    pub report_file_id: Option<i32>,
}

impl ListResultsQuery {
    /// Status filter, `None` meaning every status.
    pub fn status_filter(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
    }
}
