//! Report file registry: ingestion of uploaded reports and file listing.

use chrono::Utc;
use tracing::{info, warn};

use crate::db::projects::project_exists;
use crate::db::report_files::insert_report_file;
use crate::db::test_results::{delete_project_results, insert_batch};
use crate::db::DbPool;
use crate::entity::report_file;
use crate::error::{AggregationError, AppError, AppResult};
use crate::models::{
    NewTestResult, PageRequest, ReportFileFilter, ReportFilePage, ReportFileResponse,
};
use crate::services::normalizer;

/// Outcome of a file-grouped ingestion.
#[derive(Debug, Clone)]
pub struct IngestedFile {
    pub file: report_file::Model,
    pub inserted: u64,
}

/// Outcome of a destructive replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub reviews_deleted: u64,
    pub results_deleted: u64,
    pub inserted: u64,
}

/// Name used when the upload carries neither a name field nor a filename.
pub fn default_file_name() -> String {
    format!("report-{}.json", Utc::now().format("%Y%m%dT%H%M%SZ"))
}

/// Pick the stored name: explicit name, then the multipart filename, then a generated one.
pub fn resolve_file_name(explicit: Option<&str>, filename: Option<&str>) -> String {
    [explicit, filename]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(default_file_name)
}

/// Parse and flatten a report on the blocking pool.
async fn parse_report(bytes: Vec<u8>, project_id: i32) -> AppResult<Vec<NewTestResult>> {
    tokio::task::spawn_blocking(move || normalizer::normalize_bytes(&bytes, project_id))
        .await
        .map_err(|e| AppError::Internal(format!("Report parsing task failed: {}", e)))?
}

/// Additive upload: create a report file and insert its results.
///
/// The report is fully parsed before anything is written. The file row and
/// its batch commit together or not at all. Uploading the same report twice
/// yields two files, each with a full set of results.
pub async fn ingest_report_file(
    pool: &DbPool,
    project_id: i32,
    name: &str,
    bytes: Vec<u8>,
) -> AppResult<IngestedFile> {
    let rows = parse_report(bytes, project_id).await?;

    let txn = pool.begin().await?;

    if !project_exists(&txn, project_id).await? {
        return Err(AppError::NotFound(format!("Project {}", project_id)));
    }

    let file = insert_report_file(&txn, project_id, name).await?;
    let inserted = insert_batch(&txn, Some(file.id), &rows).await?;

    txn.commit()
        .await
        .map_err(|e| AppError::Database(format!("Failed to commit report upload: {}", e)))?;

    info!(
        project_id,
        report_file_id = file.id,
        name = %file.name,
        inserted,
        "Report file ingested"
    );

    Ok(IngestedFile { file, inserted })
}

/// Destructive upload: drop every prior result (and review) of the project
/// and insert the new batch without file grouping, in one transaction.
pub async fn replace_project_results(
    pool: &DbPool,
    project_id: i32,
    bytes: Vec<u8>,
) -> AppResult<ReplaceOutcome> {
    let rows = parse_report(bytes, project_id).await?;

    let txn = pool.begin().await?;

    if !project_exists(&txn, project_id).await? {
        return Err(AppError::NotFound(format!("Project {}", project_id)));
    }

    let (reviews_deleted, results_deleted) = delete_project_results(&txn, project_id).await?;
    let inserted = insert_batch(&txn, None, &rows).await?;

    txn.commit()
        .await
        .map_err(|e| AppError::Database(format!("Failed to commit result replace: {}", e)))?;

    info!(
        project_id,
        reviews_deleted, results_deleted, inserted, "Project results replaced"
    );

    Ok(ReplaceOutcome {
        reviews_deleted,
        results_deleted,
        inserted,
    })
}

/// List a project's report files.
///
/// Errors come back as `AggregationError` so the handler can degrade to an
/// empty page.
pub async fn list_files(
    pool: &DbPool,
    project_id: i32,
    filter: &ReportFileFilter,
    page: PageRequest,
) -> Result<ReportFilePage, AggregationError> {
    let (files, total) = pool
        .list_report_files(project_id, filter, page)
        .await
        .inspect_err(|e| warn!(project_id, error = %e, "Report file listing failed"))?;

    Ok(ReportFilePage {
        files: files.into_iter().map(ReportFileResponse::from).collect(),
        total,
        page: page.page,
        page_size: page.page_size,
    })
}
