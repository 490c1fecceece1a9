//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Test Review Hub",
        version = "0.1.0",
        description = "Upload test-run reports, browse normalized results per project, and record review decisions"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health
        api::health::health,
        api::health::ready,
        // Auth
        api::auth::register,
        api::auth::login,
        // Projects
        api::projects::list_projects,
        api::projects::create_project,
        api::projects::delete_project,
        // Reports
        api::report_files::upload_results,
        api::report_files::list_report_files,
        // Results
        api::results::list_results,
        api::results::get_result,
        // Reviews
        api::reviews::upsert_review,
        api::reviews::get_review,
        // Summaries
        api::summary::status_summary,
        api::summary::reason_summary,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::HealthResponse,
            api::health::ReadyResponse,
            models::SuccessResponse,
            models::CredentialsRequest,
            models::UserResponse,
            models::LoginResponse,
            models::ProjectSummary,
            models::ProjectResponse,
            models::CreateProjectRequest,
            models::ReportFileResponse,
            models::ReportFilePage,
            models::IngestResponse,
            models::ReplaceResponse,
            models::ResultListItem,
            models::TestResultDetail,
            models::ReviewReason,
            models::ReviewResponse,
            models::UpsertReviewRequest,
            models::StatusCount,
            models::ReasonCount,
            models::StatusSummaryResponse,
            models::ReasonSummaryResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Auth", description = "Registration and login"),
        (name = "Projects", description = "Project catalog"),
        (name = "Reports", description = "Report upload and report files"),
        (name = "Results", description = "Normalized test results"),
        (name = "Reviews", description = "Review decisions on results"),
        (name = "Summaries", description = "Grouped counts")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Declare the bearer token scheme used by write endpoints.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
