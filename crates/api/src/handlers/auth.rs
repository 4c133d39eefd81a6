//! Handlers for the `/auth` resource (register, login, refresh, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use jobtrail_core::error::CoreError;
use jobtrail_core::{time_window, validation};
use jobtrail_db::models::user::{
    default_notifications, CreateUser, UpdateUserSettings, UserProfile,
};
use jobtrail_db::repositories::UserRepo;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, verify_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    /// IANA timezone name (default: `UTC`).
    pub timezone: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserProfile,
}

/// Response for `POST /auth/refresh`: a fresh access token only. The
/// refresh token is deliberately not rotated.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account. Emails are stored lowercased; duplicates (any casing)
/// conflict. Returns the sanitized profile plus a token pair.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let email = input.email.trim().to_lowercase();
    validation::validate_email(&email)?;
    validation::validate_length(input.name.trim(), "name", 1, 200)?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let timezone = input.timezone.unwrap_or_else(|| "UTC".to_string());
    // Reject unknown timezone names up front.
    let tz = time_window::parse_timezone(&timezone)?;

    // Friendly pre-check; the uq_users_email constraint is the backstop.
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: email.clone(),
            password_hash,
            name: input.name.trim().to_string(),
            timezone,
            week_start_date: time_window::start_of_week(Utc::now(), Some(tz)),
            notifications: default_notifications(&email),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Registered new account");
    let response = auth_response(&state, user.into())?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Unknown email and wrong password
/// produce the same error so accounts cannot be enumerated.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = input.email.trim().to_lowercase();

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    UserRepo::record_login(&state.pool, user.id).await?;

    let response = auth_response(&state, user.into())?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let claims = verify_refresh_token(&input.refresh_token, &state.config.jwt)?;

    // The account may have been deleted since the token was minted.
    UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let access_token = generate_access_token(claims.sub, &state.config.jwt)?;
    Ok(Json(RefreshResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
    }))
}

/// GET /api/v1/auth/me
///
/// Return the authenticated user's sanitized profile.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserProfile>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/auth/me
///
/// Patch profile settings (name, timezone, skills, targets, weekly limit,
/// notification preferences). Email and password do not change here.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateUserSettings>,
) -> AppResult<Json<UserProfile>> {
    if let Some(name) = &input.name {
        validation::validate_length(name.trim(), "name", 1, 200)?;
    }
    if let Some(timezone) = &input.timezone {
        time_window::parse_timezone(timezone)?;
    }
    if let Some(limit) = input.weekly_connection_limit {
        if limit < 1 {
            return Err(AppError::Core(CoreError::Validation(
                "weekly_connection_limit must be at least 1".into(),
            )));
        }
    }

    let user = UserRepo::update_settings(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(user.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mint a token pair and build the authentication response.
fn auth_response(state: &AppState, user: UserProfile) -> Result<AuthResponse, AppError> {
    let access_token = generate_access_token(user.id, &state.config.jwt)?;
    let refresh_token = generate_refresh_token(user.id, &state.config.jwt)?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user,
    })
}
