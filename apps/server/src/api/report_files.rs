//! Report upload and report file listing endpoints.

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use futures_util::StreamExt;
use tracing::warn;

use super::DEGRADED_HEADER;
use crate::auth::BearerAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    IngestResponse, ListFilesQuery, ReplaceResponse, ReportFilePage,
};
use crate::services::report_files;

/// Upload limit in bytes, shared through app data.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimit(pub usize);

/// Form field carrying the report JSON.
const FILE_FIELD: &str = "file";
/// Optional form field overriding the stored file name.
const NAME_FIELD: &str = "name";

/// Parts of a multipart upload.
struct UploadForm {
    name: Option<String>,
    filename: Option<String>,
    bytes: Vec<u8>,
}

fn too_large(limit: usize) -> AppError {
    AppError::PayloadTooLarge(format!("Upload exceeds {} bytes", limit))
}

/// Drain a stream of chunks into memory, enforcing the limit.
async fn read_limited<S, E>(mut stream: S, limit: usize, so_far: &mut usize) -> AppResult<Vec<u8>>
where
    S: futures_util::Stream<Item = Result<web::Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    let mut data = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AppError::Validation(format!("Read error: {}", e)))?;
        *so_far += chunk.len();
        if *so_far > limit {
            return Err(too_large(limit));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_multipart(mut payload: Multipart, limit: usize) -> AppResult<UploadForm> {
    let mut total = 0usize;
    let mut name = None;
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::Validation(format!("Multipart error: {}", e)))?;

        let content_disposition = field
            .content_disposition()
            .ok_or_else(|| AppError::Validation("Missing content disposition".to_string()))?;
        let field_name = content_disposition.get_name().map(str::to_string);
        let filename = content_disposition.get_filename().map(str::to_string);

        match field_name.as_deref() {
            Some(FILE_FIELD) => {
                let bytes = read_limited(&mut field, limit, &mut total).await?;
                upload = Some((filename, bytes));
            }
            Some(NAME_FIELD) => {
                let bytes = read_limited(&mut field, limit, &mut total).await?;
                name = String::from_utf8(bytes)
                    .ok()
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty());
            }
            other => {
                // Drain unknown fields so the stream can advance
                let _ = read_limited(&mut field, limit, &mut total).await?;
                warn!(field = ?other, "Ignoring unexpected upload field");
            }
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::Validation("file field is required".to_string()))?;

    Ok(UploadForm {
        name,
        filename,
        bytes,
    })
}

/// How an upload body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadMode {
    /// `multipart/form-data`: add a report file.
    AddFile,
    /// `application/json`: replace the project's results.
    Replace,
}

fn upload_mode(req: &HttpRequest) -> AppResult<UploadMode> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        Ok(UploadMode::AddFile)
    } else if content_type.starts_with("application/json") {
        Ok(UploadMode::Replace)
    } else if content_type.is_empty() {
        Err(AppError::UnsupportedMediaType(
            "Content-Type is required: multipart/form-data or application/json".to_string(),
        ))
    } else {
        Err(AppError::UnsupportedMediaType(format!(
            "Unsupported upload content type '{}'",
            content_type
        )))
    }
}

/// Upload a report for a project.
///
/// `multipart/form-data` with a `file` field (and optional `name`) creates a
/// new report file and adds its results alongside earlier uploads. An
/// `application/json` body instead replaces every result of the project
/// (reviews included) with the new batch, without file grouping. Any other
/// content type is refused before the body is read.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/results/upload",
    tag = "Reports",
    params(("project_id" = i32, Path, description = "Project ID")),
    request_body(
        content_type = "multipart/form-data",
        description = "`file`: report JSON; `name`: optional display name. An application/json body triggers replace mode."
    ),
    responses(
        (status = 200, description = "Multipart upload stored as a new report file; a JSON body answers `{inserted}` (ReplaceResponse)", body = IngestResponse),
        (status = 400, description = "Malformed report or missing file", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
        (status = 413, description = "Upload too large", body = crate::error::ErrorResponse),
        (status = 415, description = "Neither multipart/form-data nor application/json", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_results(
    _auth: BearerAuth,
    req: HttpRequest,
    payload: web::Payload,
    pool: web::Data<DbPool>,
    limit: web::Data<UploadLimit>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let limit = limit.0;

    if upload_mode(&req)? == UploadMode::AddFile {
        let form = read_multipart(Multipart::new(req.headers(), payload), limit).await?;
        let name = report_files::resolve_file_name(form.name.as_deref(), form.filename.as_deref());

        let ingested =
            report_files::ingest_report_file(pool.get_ref(), project_id, &name, form.bytes)
                .await?;

        return Ok(HttpResponse::Ok().json(IngestResponse {
            success: true,
            report_file_id: ingested.file.id,
            inserted: ingested.inserted,
        }));
    }

    let mut total = 0usize;
    let bytes = read_limited(payload, limit, &mut total).await?;
    let outcome = report_files::replace_project_results(pool.get_ref(), project_id, bytes).await?;

    Ok(HttpResponse::Ok().json(ReplaceResponse {
        inserted: outcome.inserted,
    }))
}

/// List a project's report files.
///
/// Query failures degrade to an empty page with `X-Query-Degraded: true`.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/report-files",
    tag = "Reports",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("pageSize" = Option<i64>, Query, description = "Rows per page (default 10, max 100)"),
        ("name" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("dateFrom" = Option<String>, Query, description = "Inclusive lower bound, YYYY-MM-DD or RFC 3339"),
        ("dateTo" = Option<String>, Query, description = "Inclusive upper bound, YYYY-MM-DD or RFC 3339")
    ),
    responses(
        (status = 200, description = "Page of report files", body = ReportFilePage),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_report_files(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    query: web::Query<ListFilesQuery>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let filter = query.filter()?;
    let page = query.page_request();

    match report_files::list_files(pool.get_ref(), project_id, &filter, page).await {
        Ok(files) => Ok(HttpResponse::Ok().json(files)),
        Err(_) => Ok(HttpResponse::Ok()
            .insert_header((DEGRADED_HEADER, "true"))
            .json(ReportFilePage::empty(page))),
    }
}

/// Configure report routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects/{project_id}/results/upload")
            .route(web::post().to(upload_results)),
    )
    .service(
        web::resource("/projects/{project_id}/report-files")
            .route(web::get().to(list_report_files)),
    );
}
