//! Report file DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{DateRange, PageRequest};
use crate::entity::report_file;
use crate::error::AppResult;

/// One upload event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportFileResponse {
    pub id: i32,
    pub project_id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<report_file::Model> for ReportFileResponse {
    fn from(model: report_file::Model) -> Self {
        ReportFileResponse {
            id: model.id,
            project_id: model.project_id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

/// Paginated report file listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilePage {
    pub files: Vec<ReportFileResponse>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl ReportFilePage {
    /// Empty page, used when the listing query fails.
    pub fn empty(page: PageRequest) -> Self {
        ReportFilePage {
            files: Vec::new(),
            total: 0,
            page: page.page,
            page_size: page.page_size,
        }
    }
}

/// Query parameters for the report file listing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// 1-based page number (default 1).
    pub page: Option<i64>,
    /// Rows per page (default 10, max 100).
    pub page_size: Option<i64>,
    /// Case-insensitive substring of the file name.
    pub name: Option<String>,
    /// Inclusive lower bound on upload time.
    pub date_from: Option<String>,
    /// Inclusive upper bound on upload time.
    pub date_to: Option<String>,
}

impl ListFilesQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    pub fn filter(&self) -> AppResult<ReportFileFilter> {
        Ok(ReportFileFilter {
            name: self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            range: DateRange::parse(self.date_from.as_deref(), self.date_to.as_deref())?,
        })
    }
}

/// Filter applied to a project's report files.
#[derive(Debug, Clone, Default)]
pub struct ReportFileFilter {
    pub name: Option<String>,
    pub range: DateRange,
}

/// Acknowledgement for a file-grouped upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub success: bool,
    pub report_file_id: i32,
    pub inserted: u64,
}

/// Result of a destructive replace upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReplaceResponse {
    pub inserted: u64,
}
