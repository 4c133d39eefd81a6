//! Access and refresh token generation and validation.
//!
//! Both tokens are HS256-signed JWTs carrying a [`Claims`] payload with a
//! `kind` discriminator. Access and refresh tokens are signed with separate
//! secrets so a leaked refresh secret cannot mint access tokens (and vice
//! versa); when no dedicated refresh secret is configured the access secret
//! is reused.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use jobtrail_core::error::CoreError;
use jobtrail_core::types::DbId;

/// Token kind discriminator embedded in every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims embedded in access and refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Whether this is an access or refresh token.
    pub kind: TokenKind,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret for access tokens.
    pub secret: String,
    /// HMAC-SHA256 secret for refresh tokens.
    pub refresh_secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default      |
    /// |----------------------------|----------|--------------|
    /// | `JWT_SECRET`               | **yes**  | --           |
    /// | `JWT_REFRESH_SECRET`       | no       | `JWT_SECRET` |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`         |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`          |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| secret.clone());

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            refresh_secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(user_id: DbId, config: &JwtConfig) -> Result<String, CoreError> {
    let now = chrono::Utc::now().timestamp();
    sign(
        Claims {
            sub: user_id,
            kind: TokenKind::Access,
            exp: now + config.access_token_expiry_mins * 60,
            iat: now,
        },
        &config.secret,
    )
}

/// Generate an HS256 refresh token for the given user.
pub fn generate_refresh_token(user_id: DbId, config: &JwtConfig) -> Result<String, CoreError> {
    let now = chrono::Utc::now().timestamp();
    sign(
        Claims {
            sub: user_id,
            kind: TokenKind::Refresh,
            exp: now + config.refresh_token_expiry_days * 24 * 3600,
            iat: now,
        },
        &config.refresh_secret,
    )
}

/// Validate an access token and return its claims.
///
/// Refresh tokens are rejected here even though they share the claim shape,
/// so a long-lived refresh token can never be used as a bearer credential.
pub fn verify_access_token(token: &str, config: &JwtConfig) -> Result<Claims, CoreError> {
    verify(token, &config.secret, TokenKind::Access)
}

/// Validate a refresh token and return its claims.
pub fn verify_refresh_token(token: &str, config: &JwtConfig) -> Result<Claims, CoreError> {
    verify(token, &config.refresh_secret, TokenKind::Refresh)
}

fn sign(claims: Claims, secret: &str) -> Result<String, CoreError> {
    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| CoreError::Internal(format!("Token generation failed: {e}")))
}

fn verify(token: &str, secret: &str, expected: TokenKind) -> Result<Claims, CoreError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            CoreError::Unauthorized("Token has expired".into())
        }
        _ => CoreError::Unauthorized("Invalid token".into()),
    })?;

    if token_data.claims.kind != expected {
        return Err(CoreError::Unauthorized("Invalid token".into()));
    }
    Ok(token_data.claims)
}
