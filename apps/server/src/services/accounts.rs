//! User accounts: registration and password login.

use tracing::{info, warn};

use crate::auth::TokenIssuer;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CredentialsRequest, LoginResponse, UserResponse};

/// bcrypt work factor for stored password hashes.
pub const PASSWORD_HASH_COST: u32 = 10;

const INVALID_CREDENTIALS: &str = "invalid email or password";

async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, PASSWORD_HASH_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Stored password hash is unreadable: {}", e)))
}

/// Register a user. Emails are unique after normalization.
pub async fn register(pool: &DbPool, request: &CredentialsRequest) -> AppResult<UserResponse> {
    let credentials = request.validate()?;
    let password_hash = hash_password(credentials.password).await?;

    let user = pool
        .insert_user(&credentials.email, &password_hash)
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict("Email already registered".to_string()),
            other => other,
        })?;

    info!(user_id = user.id, email = %user.email, "User registered");

    Ok(user.into())
}

/// Check a password and sign an access token.
///
/// Unknown emails and wrong passwords get the same answer.
pub async fn login(
    pool: &DbPool,
    issuer: &TokenIssuer,
    request: &CredentialsRequest,
) -> AppResult<LoginResponse> {
    let credentials = request.validate()?;

    let Some(user) = pool.find_user_by_email(&credentials.email).await? else {
        warn!(email = %credentials.email, "Login for unknown email");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if !verify_password(credentials.password, user.password_hash.clone()).await? {
        warn!(user_id = user.id, "Login with wrong password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = issuer.issue(i64::from(user.id), &user.email)?;

    info!(user_id = user.id, "User logged in");

    Ok(LoginResponse {
        token,
        expires_in: issuer.ttl().num_seconds(),
        user: user.into(),
    })
}
