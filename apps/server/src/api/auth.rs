//! Account endpoints.

use actix_web::{HttpResponse, web};

use crate::auth::TokenIssuer;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{CredentialsRequest, LoginResponse, UserResponse};
use crate::services::accounts;

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "User registered", body = UserResponse),
        (status = 400, description = "Missing or invalid email or password", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    pool: web::Data<DbPool>,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let user = accounts::register(pool.get_ref(), &body).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Missing email or password", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid email or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    pool: web::Data<DbPool>,
    issuer: web::Data<TokenIssuer>,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let response = accounts::login(pool.get_ref(), issuer.get_ref(), &body).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Configure account routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/auth/register").route(web::post().to(register)))
        .service(web::resource("/auth/login").route(web::post().to(login)));
}
