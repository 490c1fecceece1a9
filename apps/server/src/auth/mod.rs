//! Bearer-token identity verification.
//!
//! Identity is a collaborator: handlers only need "who is calling, or
//! nobody". `IdentityVerifier` is that seam; `JwtVerifier` is the HS256
//! implementation the server ships with.

mod extractor;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};

pub use extractor::BearerAuth;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub email: String,
}

/// Resolves a bearer token to a principal, or rejects it.
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Option<Principal>;
}

/// JWT claims carried by access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub sub: String,
    pub user_id: i64,
    pub email: String,
    pub exp: usize,
}

/// HS256 JWT verifier.
///
/// The secret stays wrapped in `SecretString`; `Debug` never prints it.
#[derive(Clone)]
pub struct JwtVerifier {
    secret: SecretString,
}

impl JwtVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Sign an access token for a user.
    pub fn issue(&self, user_id: i64, email: &str, ttl: Duration) -> AppResult<String> {
        let claims = AccessClaims {
            sub: user_id.to_string(),
            user_id,
            email: email.to_string(),
            exp: (Utc::now() + ttl).timestamp().max(0) as usize,
        };

        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| AppError::Internal(format!("Failed to create access token: {}", e)))
    }
}

/// Signs access tokens with a fixed lifetime.
#[derive(Clone, Debug)]
pub struct TokenIssuer {
    jwt: JwtVerifier,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(jwt: JwtVerifier, ttl: Duration) -> Self {
        Self { jwt, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: i64, email: &str) -> AppResult<String> {
        self.jwt.issue(user_id, email, self.ttl)
    }
}

impl IdentityVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Option<Principal> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;

        match decode::<AccessClaims>(token, &key, &validation) {
            Ok(data) => Some(Principal {
                user_id: data.claims.user_id,
                email: data.claims.email,
            }),
            Err(e) => {
                debug!(error = %e, "Bearer token rejected");
                None
            }
        }
    }
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JwtVerifier([REDACTED])")
    }
}
