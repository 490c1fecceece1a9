//! Review endpoints.

use actix_web::{HttpResponse, web};

use crate::auth::BearerAuth;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{ReviewResponse, UpsertReviewRequest};
use crate::services::review_ledger;

/// Create or replace the review of a result.
#[utoipa::path(
    post,
    path = "/api/v1/results/{result_id}/review",
    tag = "Reviews",
    params(("result_id" = i32, Path, description = "Test result ID")),
    request_body = UpsertReviewRequest,
    responses(
        (status = 200, description = "Review stored", body = ReviewResponse),
        (status = 400, description = "Missing field or unknown reason", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 404, description = "Result not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upsert_review(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<UpsertReviewRequest>,
) -> AppResult<HttpResponse> {
    let review = review_ledger::upsert_review(pool.get_ref(), path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(ReviewResponse::from(review)))
}

/// Get the review of a result.
#[utoipa::path(
    get,
    path = "/api/v1/results/{result_id}/review",
    tag = "Reviews",
    params(("result_id" = i32, Path, description = "Test result ID")),
    responses(
        (status = 200, description = "Review", body = ReviewResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 404, description = "No review for this result", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_review(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let review = review_ledger::get_review(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ReviewResponse::from(review)))
}

/// Configure review routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/results/{result_id}/review")
            .route(web::get().to(get_review))
            .route(web::post().to(upsert_review)),
    );
}
