//! API endpoint modules.

use actix_web::{HttpRequest, error, web};

use crate::error::AppError;

pub mod auth;
pub mod health;
pub mod openapi;
pub mod projects;
pub mod query;
pub mod report_files;
pub mod results;
pub mod reviews;
pub mod summary;

pub use openapi::ApiDoc;
pub use report_files::UploadLimit;

/// Set on fail-soft responses whose empty body stands in for a failed query.
pub const DEGRADED_HEADER: &str = "X-Query-Degraded";

/// Register every `/api/v1` route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(projects::configure_routes)
        .configure(report_files::configure_routes)
        .configure(results::configure_routes)
        .configure(reviews::configure_routes)
        .configure(summary::configure_routes);
}

/// JSON extractor config rendering body errors in the API error format.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        AppError::MalformedInput(err.to_string()).into()
    })
}
