//! LinkedIn OAuth integration: authorization URL, code exchange, and
//! refresh-before-use access-token retrieval.
//!
//! Tokens are never stored in plaintext; they pass through the credential
//! store (`jobtrail_core::crypto`) on the way to the `users` table. CSRF
//! state tokens live in the `oauth_states` table with a one-hour expiry so
//! a callback can land on any server instance.

use chrono::{Duration, Utc};
use jobtrail_core::crypto;
use jobtrail_core::error::CoreError;
use jobtrail_core::types::Timestamp;
use jobtrail_db::models::user::User;
use jobtrail_db::repositories::UserRepo;
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::config::LinkedInConfig;

const AUTHORIZATION_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";
const TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";
const USERINFO_URL: &str = "https://api.linkedin.com/v2/userinfo";
const UGC_POSTS_URL: &str = "https://api.linkedin.com/v2/ugcPosts";
const OAUTH_SCOPES: &str = "openid profile email w_member_social";

/// CSRF state lifetime.
pub const STATE_TTL_SECS: i64 = 3600;

/// Tokens returned by the provider's token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Subset of the OpenID userinfo payload we keep.
#[derive(Debug, Deserialize)]
pub struct MemberProfile {
    /// The member's opaque provider id.
    pub sub: String,
}

/// HTTP client for the LinkedIn OAuth endpoints.
pub struct LinkedInClient {
    client: reqwest::Client,
    config: LinkedInConfig,
}

impl LinkedInClient {
    pub fn new(config: LinkedInConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Generate a fresh CSRF state token.
    pub fn new_state() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// When the state row was minted, when does it expire.
    pub fn state_expiry(now: Timestamp) -> Timestamp {
        now + Duration::seconds(STATE_TTL_SECS)
    }

    /// Build the provider authorization URL carrying the CSRF state.
    pub fn authorization_url(&self, state: &str) -> Result<String, CoreError> {
        let mut url = Url::parse(AUTHORIZATION_URL)
            .map_err(|e| CoreError::Internal(format!("Bad authorization URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("state", state)
            .append_pair("scope", OAUTH_SCOPES);
        Ok(url.into())
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, CoreError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
            ("redirect_uri", &self.config.redirect_uri),
        ];
        self.token_request(&params).await
    }

    /// Exchange a refresh token for a new access token.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenResponse, CoreError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
        ];
        self.token_request(&params).await
    }

    /// Fetch the member's OpenID profile with a bearer access token.
    pub async fn member_profile(&self, access_token: &str) -> Result<MemberProfile, CoreError> {
        let response = self
            .client
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| CoreError::external(format!("Userinfo request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CoreError::external(format!(
                "Userinfo request returned {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| CoreError::external(format!("Malformed userinfo response: {e}")))
    }

    /// Share a text post on the member's feed.
    pub async fn share_post(
        &self,
        access_token: &str,
        member_id: &str,
        text: &str,
    ) -> Result<(), CoreError> {
        let body = serde_json::json!({
            "author": format!("urn:li:person:{member_id}"),
            "lifecycleState": "PUBLISHED",
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "shareCommentary": { "text": text },
                    "shareMediaCategory": "NONE"
                }
            },
            "visibility": {
                "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC"
            }
        });

        let response = self
            .client
            .post(UGC_POSTS_URL)
            .bearer_auth(access_token)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::external(format!("Share request failed: {e}")))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(CoreError::rate_limited(
                "LinkedIn share rate limit exceeded",
            )),
            reqwest::StatusCode::UNAUTHORIZED => Err(CoreError::auth_misconfigured(
                "LinkedIn access token was rejected",
            )),
            status => Err(CoreError::external(format!(
                "Share endpoint returned {status}"
            ))),
        }
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Result<TokenResponse, CoreError> {
        let response = self
            .client
            .post(TOKEN_URL)
            .form(params)
            .send()
            .await
            .map_err(|e| CoreError::external(format!("Token request failed: {e}")))?;

        match response.status() {
            status if status.is_success() => {}
            reqwest::StatusCode::UNAUTHORIZED => {
                return Err(CoreError::auth_misconfigured(
                    "LinkedIn client credentials were rejected",
                ));
            }
            status => {
                return Err(CoreError::external(format!(
                    "Token endpoint returned {status}"
                )));
            }
        }

        response
            .json()
            .await
            .map_err(|e| CoreError::external(format!("Malformed token response: {e}")))
    }
}

/// Decrypt the user's stored access token, refreshing it against the
/// provider first when it has expired and a refresh token is on file.
///
/// Returns `None` when the user has no usable integration.
pub async fn access_token_for(
    pool: &jobtrail_db::DbPool,
    client: &LinkedInClient,
    key: &[u8; 32],
    user: &User,
) -> Result<Option<String>, CoreError> {
    if !user.linkedin_connected {
        return Ok(None);
    }
    let Some(encrypted) = user.linkedin_access_token.as_deref() else {
        return Ok(None);
    };

    let expired = user
        .linkedin_expires_at
        .is_some_and(|expires_at| expires_at <= Utc::now());
    if !expired {
        return crypto::decrypt(encrypted, key).map(Some);
    }

    // Expired: refresh against the provider when possible.
    let Some(encrypted_refresh) = user.linkedin_refresh_token.as_deref() else {
        return Ok(None);
    };
    let refresh_token = crypto::decrypt(encrypted_refresh, key)?;
    let tokens = client.refresh_tokens(&refresh_token).await?;

    let new_encrypted = crypto::encrypt(&tokens.access_token, key)?;
    let expires_at = tokens
        .expires_in
        .map(|secs| Utc::now() + Duration::seconds(secs));
    UserRepo::update_linkedin_access_token(pool, user.id, &new_encrypted, expires_at)
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to store refreshed token: {e}")))?;
    tracing::info!(user_id = user.id, "Refreshed LinkedIn access token");

    Ok(Some(tokens.access_token))
}
