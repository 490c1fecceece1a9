//! Project catalog endpoints.

use actix_web::{HttpResponse, web};

use crate::auth::BearerAuth;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{CreateProjectRequest, ProjectResponse, ProjectSummary, SuccessResponse};
use crate::services::projects;

/// List projects with their failed result counts.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "All projects, newest first", body = Vec<ProjectSummary>)
    )
)]
pub async fn list_projects(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let projects = projects::list_projects(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// Create a project.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "Projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Missing name", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_project(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    body: web::Json<CreateProjectRequest>,
) -> AppResult<HttpResponse> {
    let project = projects::create_project(pool.get_ref(), &body).await?;
    Ok(HttpResponse::Created().json(project))
}

/// Delete a project with its report files, results and reviews.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}",
    tag = "Projects",
    params(("project_id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project deleted", body = SuccessResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_project(
    auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let deleted = projects::delete_project(pool.get_ref(), project_id).await?;

    tracing::info!(
        project_id,
        user_id = auth.principal.user_id,
        report_files = deleted.report_files,
        test_results = deleted.test_results,
        reviews = deleted.reviews,
        "Project deleted via API"
    );

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// Configure project routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(list_projects))
            .route(web::post().to(create_project)),
    )
    .service(web::resource("/projects/{project_id}").route(web::delete().to(delete_project)));
}
