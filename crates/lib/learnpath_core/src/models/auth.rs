//! Authentication domain models.

use serde::{Deserialize, Serialize};

/// JWT claims embedded in session tokens.
///
/// Tokens are stateless: validity is purely a function of signature and
/// expiry, and there is no server-side revocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (standard JWT `sub` claim).
    pub sub: String,
    /// User email.
    pub email: String,
    /// Display name, if the user supplied one.
    pub name: Option<String>,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}
