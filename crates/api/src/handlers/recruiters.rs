//! Handlers for the `/recruiters` resource: CRUD, outreach status moves,
//! contact-message generation, and the weekly connection count.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use jobtrail_core::error::CoreError;
use jobtrail_core::generation::{fallback_contact_messages, recruiter_search_urls, SearchUrl};
use jobtrail_core::recruiter_status::{GeneratedMessage, RecruiterStatus};
use jobtrail_core::types::{DbId, Timestamp};
use jobtrail_core::validation;
use jobtrail_db::models::recruiter::{
    CreateRecruiter, Recruiter, RecruiterFilter, UpdateRecruiter,
};
use jobtrail_db::repositories::{RecruiterRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::posts::user_week_start;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /recruiters/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Response for `GET /recruiters/stats/weekly-count`.
#[derive(Debug, Serialize)]
pub struct ConnectionCountResponse {
    pub count: i64,
    pub limit: i32,
    /// Monday 00:00 of the counted week, in the user's timezone.
    pub week_start: Timestamp,
}

/// Response for `GET /recruiters/search/linkedin-urls`.
#[derive(Debug, Serialize)]
pub struct SearchUrlsResponse {
    pub search_urls: Vec<SearchUrl>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/recruiters
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateRecruiter>,
) -> AppResult<(StatusCode, Json<Recruiter>)> {
    validation::validate_length(&input.name, "name", 1, 200)?;
    validation::validate_length(&input.company, "company", 1, 200)?;
    validation::validate_url(&input.linkedin_profile_url, "linkedin_profile_url")?;

    // Pre-check for a friendlier message than the constraint violation.
    let existing =
        RecruiterRepo::find_by_profile_url(&state.pool, auth.user_id, &input.linkedin_profile_url)
            .await?;
    if existing.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "A recruiter with this profile URL already exists".into(),
        )));
    }

    let recruiter = RecruiterRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(recruiter)))
}

/// GET /api/v1/recruiters
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<RecruiterFilter>,
) -> AppResult<Json<Vec<Recruiter>>> {
    if let Some(status) = &filter.status {
        RecruiterStatus::parse(status)?;
    }
    let recruiters = RecruiterRepo::list(&state.pool, auth.user_id, &filter).await?;
    Ok(Json(recruiters))
}

/// GET /api/v1/recruiters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Recruiter>> {
    let recruiter = find_recruiter(&state, auth.user_id, id).await?;
    Ok(Json(recruiter))
}

/// PUT /api/v1/recruiters/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRecruiter>,
) -> AppResult<Json<Recruiter>> {
    if let Some(name) = &input.name {
        validation::validate_length(name, "name", 1, 200)?;
    }
    if let Some(company) = &input.company {
        validation::validate_length(company, "company", 1, 200)?;
    }

    let recruiter = RecruiterRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recruiter",
            id,
        }))?;
    Ok(Json(recruiter))
}

/// DELETE /api/v1/recruiters/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = RecruiterRepo::delete(&state.pool, auth.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Recruiter",
            id,
        }))
    }
}

/// PUT /api/v1/recruiters/{id}/status
///
/// Moving to `connection_sent` pins the current week for quota accounting;
/// the pinned week is never recomputed by later transitions.
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<Recruiter>> {
    RecruiterStatus::parse(&input.status)?;
    let week_start = user_week_start(&state, auth.user_id).await?;

    let recruiter =
        RecruiterRepo::update_status(&state.pool, auth.user_id, id, &input.status, week_start)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Recruiter",
                id,
            }))?;
    Ok(Json(recruiter))
}

/// POST /api/v1/recruiters/{id}/generate-messages
///
/// Generates three outreach drafts personalized from the user's skills and
/// the recruiter's profile, and stores them on the recruiter row.
pub async fn generate_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Recruiter>> {
    let recruiter = find_recruiter(&state, auth.user_id, id).await?;
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let experience = user.target_industries.join(", ");
    let now = Utc::now();
    let messages: Vec<GeneratedMessage> =
        fallback_contact_messages(&recruiter.name, &recruiter.company, &user.skills, &experience)
            .into_iter()
            .map(|draft| GeneratedMessage {
                message: draft.message,
                generated_at: now,
                used: false,
            })
            .collect();

    let payload = serde_json::to_value(&messages)
        .map_err(|e| AppError::InternalError(format!("Failed to encode messages: {e}")))?;
    let recruiter = RecruiterRepo::set_generated_messages(&state.pool, auth.user_id, id, &payload)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recruiter",
            id,
        }))?;
    Ok(Json(recruiter))
}

/// GET /api/v1/recruiters/search/linkedin-urls
///
/// A fixed set of people-search URLs for finding recruiters, seeded from the
/// user's skills and first target region.
pub async fn search_linkedin_urls(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<SearchUrlsResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let location = user.target_regions.first().map(String::as_str);
    let search_urls = recruiter_search_urls(&user.skills, location, &[]);
    Ok(Json(SearchUrlsResponse { search_urls }))
}

/// GET /api/v1/recruiters/stats/weekly-count
///
/// Connection requests pinned to the current Monday-aligned week, alongside
/// the user's configured weekly limit.
pub async fn weekly_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ConnectionCountResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    let tz = jobtrail_core::time_window::parse_timezone(&user.timezone).ok();
    let week_start = jobtrail_core::time_window::start_of_week(Utc::now(), tz);
    let count = RecruiterRepo::count_connections_in_week(&state.pool, auth.user_id, week_start)
        .await?;

    Ok(Json(ConnectionCountResponse {
        count,
        limit: user.weekly_connection_limit,
        week_start,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_recruiter(state: &AppState, user_id: DbId, id: DbId) -> Result<Recruiter, AppError> {
    RecruiterRepo::find(&state.pool, user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recruiter",
            id,
        }))
}
