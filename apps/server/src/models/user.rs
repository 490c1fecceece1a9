//! Account DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::user;
use crate::error::{AppError, AppResult};

/// Credentials submitted to register or log in.
#[derive(Clone, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Credentials that passed validation.
pub struct Credentials {
    /// Trimmed and lowercased.
    pub email: String,
    pub password: String,
}

impl CredentialsRequest {
    pub fn validate(&self) -> AppResult<Credentials> {
        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::Validation("email is required".to_string()))?;

        if !email.contains('@') {
            return Err(AppError::Validation("email is not valid".to_string()));
        }

        let password = self
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::Validation("password is required".to_string()))?;

        Ok(Credentials {
            email: email.to_lowercase(),
            password: password.to_string(),
        })
    }
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        UserResponse {
            id: model.id,
            email: model.email,
        }
    }
}

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the write endpoints.
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
    pub user: UserResponse,
}
