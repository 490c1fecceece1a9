//! Domain models and DTOs for Test Review Hub.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

pub mod project;
pub mod report_file;
pub mod review;
pub mod summary;
pub mod test_result;
pub mod user;

// Re-export commonly used types
pub use project::{CreateProjectRequest, ProjectResponse, ProjectSummary};
pub use report_file::{
    IngestResponse, ListFilesQuery, ReplaceResponse, ReportFileFilter, ReportFilePage,
    ReportFileResponse,
};
pub use review::{ReviewReason, ReviewResponse, UpsertReviewRequest, ValidatedReview};
pub use summary::{
    ReasonCount, ReasonSummaryResponse, StatusCount, StatusSummaryResponse, SummaryFilter,
};
pub use test_result::{
    ListResultsQuery, NewTestResult, ResultListItem, TestResultDetail,
};
pub use user::{Credentials, CredentialsRequest, LoginResponse, UserResponse};

/// Default page size for paginated listings.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Upper bound on page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// A validated page request.
///
/// `page` is 1-based; anything below 1 is treated as 1. `page_size` is
/// clamped into `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1) as u64;
        let page_size = page_size
            .map(|s| s.clamp(1, MAX_PAGE_SIZE as i64) as u64)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        PageRequest { page, page_size }
    }

    /// Rows to skip for this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::new(None, None)
    }
}

/// Half-open time window `[from, until)` used by listings and summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    /// Exclusive.
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Parse optional inclusive lower/upper bounds from query strings.
    ///
    /// Accepts `YYYY-MM-DD` or RFC 3339. A date-only upper bound covers the
    /// whole day: it becomes the next midnight, exclusive. An RFC 3339 upper
    /// bound stays inclusive at microsecond precision. Empty strings are
    /// treated as absent.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> AppResult<Self> {
        let from = match from.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_lower_bound(raw)?),
            None => None,
        };
        let until = match to.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_upper_bound(raw)?),
            None => None,
        };

        Ok(DateRange { from, until })
    }
}

enum DateBound {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

fn parse_date_bound(raw: &str) -> AppResult<DateBound> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(DateBound::Instant(ts.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(DateBound::Day)
        .map_err(|_| {
            AppError::Validation(format!(
                "invalid date '{}': expected YYYY-MM-DD or RFC 3339",
                raw
            ))
        })
}

fn midnight(date: NaiveDate, raw: &str) -> AppResult<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .ok_or_else(|| AppError::Validation(format!("invalid date '{}'", raw)))
}

/// Inclusive lower bound: a bare date starts at midnight UTC.
fn parse_lower_bound(raw: &str) -> AppResult<DateTime<Utc>> {
    match parse_date_bound(raw)? {
        DateBound::Instant(ts) => Ok(ts),
        DateBound::Day(date) => midnight(date, raw),
    }
}

/// Exclusive upper bound for an inclusive query value.
fn parse_upper_bound(raw: &str) -> AppResult<DateTime<Utc>> {
    match parse_date_bound(raw)? {
        DateBound::Instant(ts) => Ok(ts + Duration::microseconds(1)),
        DateBound::Day(date) => {
            let next = date
                .succ_opt()
                .ok_or_else(|| AppError::Validation(format!("invalid date '{}'", raw)))?;
            midnight(next, raw)
        }
    }
}

/// Generic `{ "success": true }` acknowledgement.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        SuccessResponse { success: true }
    }
}
