//! Result browsing endpoints.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{ListResultsQuery, ResultListItem, TestResultDetail};

/// List a project's results, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/results",
    tag = "Results",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
        ("status" = Option<String>, Query, description = "`all` (default) or a status such as `failed`"),
        ("reportFileId" = Option<i32>, Query, description = "Restrict to one report file")
    ),
    responses(
        (status = 200, description = "Results with their review flag", body = Vec<ResultListItem>),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_results(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    query: web::Query<ListResultsQuery>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();

    if pool.get_project(project_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Project {}", project_id)));
    }

    let rows = pool
        .list_project_results(project_id, query.status_filter(), query.report_file_id)
        .await?;

    let items: Vec<ResultListItem> = rows
        .into_iter()
        .map(|(result, review)| ResultListItem::new(result, review.is_some()))
        .collect();

    Ok(HttpResponse::Ok().json(items))
}

/// Get one result with its review.
#[utoipa::path(
    get,
    path = "/api/v1/results/{result_id}",
    tag = "Results",
    params(("result_id" = i32, Path, description = "Test result ID")),
    responses(
        (status = 200, description = "Result detail", body = TestResultDetail),
        (status = 404, description = "Result not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_result(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let result_id = path.into_inner();

    let (result, review) = pool
        .get_test_result_with_review(result_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test result {}", result_id)))?;

    Ok(HttpResponse::Ok().json(TestResultDetail::new(result, review)))
}

/// Configure result routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects/{project_id}/results").route(web::get().to(list_results)),
    )
    .service(web::resource("/results/{result_id}").route(web::get().to(get_result)));
}
