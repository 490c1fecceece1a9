//! Aggregate count endpoints.
//!
//! Both endpoints fail soft: a query failure is answered with an empty list
//! and `X-Query-Degraded: true` rather than a 5xx.

use actix_web::{HttpRequest, HttpResponse, web};

use super::{DEGRADED_HEADER, query};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{ReasonSummaryResponse, StatusSummaryResponse};
use crate::services::aggregation;

/// Result counts per status.
#[utoipa::path(
    get,
    path = "/api/v1/summary",
    tag = "Summaries",
    params(
        ("projectIds[]" = Option<Vec<i32>>, Query, description = "Repeatable project filter"),
        ("reportFileIds[]" = Option<Vec<i32>>, Query, description = "Repeatable report file filter"),
        ("startDate" = Option<String>, Query, description = "Inclusive lower bound on result timestamp"),
        ("endDate" = Option<String>, Query, description = "Inclusive upper bound on result timestamp")
    ),
    responses(
        (status = 200, description = "Counts per status", body = StatusSummaryResponse),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    )
)]
pub async fn status_summary(
    req: HttpRequest,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let filter = query::summary_filter(req.query_string())?;

    match aggregation::summarize_status(pool.get_ref(), &filter).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(StatusSummaryResponse { summary })),
        Err(_) => Ok(HttpResponse::Ok()
            .insert_header((DEGRADED_HEADER, "true"))
            .json(StatusSummaryResponse {
                summary: Vec::new(),
            })),
    }
}

/// Review counts per reason.
#[utoipa::path(
    get,
    path = "/api/v1/review-reasons",
    tag = "Summaries",
    params(
        ("projectIds[]" = Option<Vec<i32>>, Query, description = "Repeatable project filter"),
        ("reportFileIds[]" = Option<Vec<i32>>, Query, description = "Repeatable report file filter"),
        ("startDate" = Option<String>, Query, description = "Inclusive lower bound on review time"),
        ("endDate" = Option<String>, Query, description = "Inclusive upper bound on review time")
    ),
    responses(
        (status = 200, description = "Counts per reason", body = ReasonSummaryResponse),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    )
)]
pub async fn reason_summary(
    req: HttpRequest,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let filter = query::summary_filter(req.query_string())?;

    match aggregation::summarize_review_reasons(pool.get_ref(), &filter).await {
        Ok(reasons) => Ok(HttpResponse::Ok().json(ReasonSummaryResponse { reasons })),
        Err(_) => Ok(HttpResponse::Ok()
            .insert_header((DEGRADED_HEADER, "true"))
            .json(ReasonSummaryResponse {
                reasons: Vec::new(),
            })),
    }
}

/// Configure summary routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/summary").route(web::get().to(status_summary)))
        .service(web::resource("/review-reasons").route(web::get().to(reason_summary)));
}
