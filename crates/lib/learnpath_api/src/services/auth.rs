//! Authentication service — login/register flows delegating to
//! `learnpath_core::auth`.

use learnpath_core::auth::jwt::{SESSION_TOKEN_EXPIRY_SECS, generate_session_token};
use learnpath_core::auth::password::{hash_password, verify_password};
use learnpath_core::auth::queries;
use sqlx::PgPool;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{AuthUser, RegisterResponse, TokenResponse};

/// Uniform credential failure. The same message covers an unknown email and
/// a wrong password so callers cannot enumerate accounts.
fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password.".into())
}

/// Register a new user account, returning the new user ID.
pub async fn register(
    pool: &PgPool,
    email: &str,
    password: &str,
    name: &str,
) -> AppResult<RegisterResponse> {
    if password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }

    // Check duplicate email
    if queries::email_exists(pool, email).await? {
        return Err(AppError::Conflict("Email already in use.".into()));
    }

    let pw_hash = hash_password(password)?;
    let user_id = queries::create_user(pool, email, Some(name), &pw_hash).await?;

    info!(email, "new user registered");

    Ok(RegisterResponse { user_id })
}

/// Authenticate with email + password, issuing a 72 h session token.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let row = queries::find_user_by_email(pool, email).await?;

    let (user_id, name, pw_hash) = match row {
        // Generic error for an unknown email
        None => return Err(invalid_credentials()),
        Some(r) => r,
    };

    // Generic error for a wrong password
    if !verify_password(password, &pw_hash)? {
        return Err(invalid_credentials());
    }

    let token = generate_session_token(&user_id, email, name.as_deref(), jwt_secret)?;

    Ok(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: SESSION_TOKEN_EXPIRY_SECS,
        user: AuthUser {
            id: user_id,
            email: email.to_string(),
            name,
        },
    })
}
