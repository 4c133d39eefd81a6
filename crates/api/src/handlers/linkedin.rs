//! Handlers for the LinkedIn OAuth connect / disconnect flow.
//!
//! CSRF state tokens live in the database so the flow survives a server
//! restart between issuing the authorization URL and receiving the callback.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use jobtrail_core::crypto;
use jobtrail_core::error::CoreError;
use jobtrail_db::models::user::ConnectLinkedIn;
use jobtrail_db::repositories::{OauthStateRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::linkedin::LinkedInClient;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response for `GET /linkedin/auth-url`.
#[derive(Debug, Serialize)]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

/// Query parameters sent by the provider to the callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

/// Response for the callback and disconnect endpoints.
#[derive(Debug, Serialize)]
pub struct ConnectionStatusResponse {
    pub connected: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/linkedin/auth-url
///
/// Issues a fresh authorization URL with a single-use CSRF state token.
pub async fn auth_url(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<AuthUrlResponse>> {
    let client = client_for(&state)?;

    // Housekeeping: expired tokens accumulate from abandoned flows.
    if let Err(e) = OauthStateRepo::purge_expired(&state.pool).await {
        tracing::warn!(error = %e, "Failed to purge expired OAuth states");
    }

    let token = LinkedInClient::new_state();
    let expires_at = LinkedInClient::state_expiry(Utc::now());
    OauthStateRepo::insert(&state.pool, &token, auth.user_id, expires_at).await?;

    let auth_url = client.authorization_url(&token)?;
    Ok(Json(AuthUrlResponse { auth_url }))
}

/// GET /api/v1/linkedin/callback
///
/// Completes the flow: validates the state token, exchanges the code,
/// fetches the member id, and stores the tokens encrypted at rest.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> AppResult<Json<ConnectionStatusResponse>> {
    let client = client_for(&state)?;

    let oauth_state = OauthStateRepo::consume(&state.pool, &params.state)
        .await?
        .ok_or(AppError::Core(CoreError::Unauthorized(
            "Invalid or expired OAuth state".into(),
        )))?;

    let tokens = client.exchange_code(&params.code).await?;
    let profile = client.member_profile(&tokens.access_token).await?;

    let access_token = crypto::encrypt(&tokens.access_token, &state.encryption_key)?;
    let refresh_token = tokens
        .refresh_token
        .as_deref()
        .map(|t| crypto::encrypt(t, &state.encryption_key))
        .transpose()?;
    let expires_at = tokens
        .expires_in
        .map(|secs| Utc::now() + Duration::seconds(secs));

    let input = ConnectLinkedIn {
        access_token,
        refresh_token,
        expires_at,
        member_id: Some(profile.sub),
        profile_url: None,
    };
    UserRepo::connect_linkedin(&state.pool, oauth_state.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: oauth_state.user_id,
        }))?;

    tracing::info!(user_id = oauth_state.user_id, "LinkedIn account connected");
    Ok(Json(ConnectionStatusResponse { connected: true }))
}

/// POST /api/v1/linkedin/disconnect
pub async fn disconnect(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<(StatusCode, Json<ConnectionStatusResponse>)> {
    UserRepo::disconnect_linkedin(&state.pool, auth.user_id).await?;
    Ok((
        StatusCode::OK,
        Json(ConnectionStatusResponse { connected: false }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn client_for(state: &AppState) -> Result<LinkedInClient, AppError> {
    let config = state.config.linkedin.clone().ok_or_else(|| {
        CoreError::auth_misconfigured("LinkedIn integration is not configured")
    })?;
    Ok(LinkedInClient::new(config))
}
