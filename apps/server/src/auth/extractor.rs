//! Actix-web extractor for bearer-token authentication.

use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use std::future::{Ready, ready};

use super::{IdentityVerifier, Principal};
use crate::error::ErrorResponse;

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    message: String,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::UNAUTHORIZED).json(ErrorResponse {
            error: "UNAUTHORIZED".to_string(),
            message: self.message.clone(),
        })
    }
}

fn unauthorized(message: &str) -> Ready<Result<BearerAuth, AuthError>> {
    ready(Err(AuthError {
        message: message.to_string(),
    }))
}

/// Extractor that requires a valid `Authorization: Bearer <token>` header.
///
/// ```ignore
/// async fn protected_handler(auth: BearerAuth) -> impl Responder {
///     // auth.principal is the verified caller
/// }
/// ```
pub struct BearerAuth {
    pub principal: Principal,
}

impl FromRequest for BearerAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let verifier = match req.app_data::<web::Data<dyn IdentityVerifier>>() {
            Some(verifier) => verifier,
            None => return unauthorized("Internal configuration error"),
        };

        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let Some(token) = token else {
            return unauthorized("Missing bearer token. Provide an Authorization header.");
        };

        match verifier.verify(token) {
            Some(principal) => ready(Ok(BearerAuth { principal })),
            None => unauthorized("Invalid or expired token"),
        }
    }
}
