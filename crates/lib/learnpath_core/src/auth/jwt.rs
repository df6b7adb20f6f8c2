//! Session token generation and verification.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::info;

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Session token lifetime: 72 hours.
pub const SESSION_TOKEN_EXPIRY_SECS: i64 = 72 * 60 * 60;

/// Generate a signed session token (HS256, 72 h expiry).
pub fn generate_session_token(
    user_id: &str,
    email: &str,
    name: Option<&str>,
    secret: &[u8],
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        name: name.map(|n| n.to_string()),
        exp: (now + Duration::seconds(SESSION_TOKEN_EXPIRY_SECS)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify a session token, returning the claims on success.
pub fn verify_session_token(token: &str, secret: &[u8]) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    decode::<TokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

/// Resolve the JWT secret: env var `JWT_SECRET`, then a file under the
/// platform data dir, generating and persisting a fresh one if neither
/// is present.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    let secret_path = jwt_secret_path();
    if let Some(secret) = read_persisted_secret(&secret_path) {
        return secret;
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&secret_path, &secret);
    info!(path = %secret_path.display(), "generated new JWT secret");
    secret
}

fn read_persisted_secret(path: &Path) -> Option<String> {
    let existing = std::fs::read_to_string(path).ok()?;
    let trimmed = existing.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("learnpath")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn generate_then_verify_roundtrip() {
        let token =
            generate_session_token("user-1", "a@example.com", Some("Ada"), SECRET).unwrap();
        let claims = verify_session_token(&token, SECRET).expect("token should verify");
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn expiry_is_72_hours_out() {
        let token = generate_session_token("user-1", "a@example.com", None, SECRET).unwrap();
        let claims = verify_session_token(&token, SECRET).unwrap();
        assert_eq!(claims.exp - claims.iat, SESSION_TOKEN_EXPIRY_SECS);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_session_token("user-1", "a@example.com", None, SECRET).unwrap();
        assert!(verify_session_token(&token, b"other-secret").is_none());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_session_token("not.a.jwt", SECRET).is_none());
    }
}
