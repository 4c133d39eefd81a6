//! Handlers for the `/posts` resource: CRUD plus the lifecycle operations
//! (schedule, retry, publish) and the weekly quota counter.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use jobtrail_core::error::CoreError;
use jobtrail_core::generation::fallback_post_content;
use jobtrail_core::types::{DbId, Timestamp};
use jobtrail_core::{post_lifecycle, time_window};
use jobtrail_db::models::post::{CreatePost, Post, PostFilter, UpdatePost};
use jobtrail_db::repositories::{PostIdeaRepo, PostRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::generation::PostRequest;
use crate::linkedin::{self, LinkedInClient};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /posts`.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub scheduled_at: Option<Timestamp>,
    /// Idea this post was written from; marked used after creation.
    pub post_idea_id: Option<DbId>,
}

/// Request body for `POST /posts/{id}/schedule`.
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub scheduled_at: Timestamp,
}

/// Request body for `POST /posts/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateContentRequest {
    pub post_idea_id: DbId,
    pub tone: Option<String>,
    pub max_words: Option<u32>,
}

/// Response for `POST /posts/generate`.
#[derive(Debug, Serialize)]
pub struct GeneratedContentResponse {
    pub content: String,
}

/// Response for `GET /posts/stats/weekly-count`.
#[derive(Debug, Serialize)]
pub struct WeeklyCountResponse {
    pub count: i64,
    /// Monday 00:00 of the counted week, in the user's timezone.
    pub week_start: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/posts
///
/// Status is derived from `scheduled_at`: present means `scheduled`, absent
/// means `draft`.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<Post>)> {
    post_lifecycle::validate_content(&input.content)?;

    let status = post_lifecycle::initial_status(input.scheduled_at.is_some());
    let post = PostRepo::create(
        &state.pool,
        auth.user_id,
        &CreatePost {
            post_idea_id: input.post_idea_id,
            content: input.content,
            status: status.as_str(),
            scheduled_at: input.scheduled_at,
        },
    )
    .await?;

    // Best-effort: link the source idea. The post already exists, so a
    // failure here must not fail the request.
    if let Some(idea_id) = input.post_idea_id {
        match PostIdeaRepo::mark_used(&state.pool, auth.user_id, idea_id, post.id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!(idea_id, post_id = post.id, "Source idea not found when linking")
            }
            Err(e) => {
                tracing::warn!(idea_id, post_id = post.id, error = %e, "Failed to mark idea used")
            }
        }
    }

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/v1/posts
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<PostFilter>,
) -> AppResult<Json<Vec<Post>>> {
    let posts = PostRepo::list(&state.pool, auth.user_id, &filter).await?;
    Ok(Json(posts))
}

/// GET /api/v1/posts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Post>> {
    let post = find_post(&state, auth.user_id, id).await?;
    Ok(Json(post))
}

/// PUT /api/v1/posts/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<Json<Post>> {
    if let Some(content) = &input.content {
        post_lifecycle::validate_content(content)?;
    }
    if let Some(status) = &input.status {
        post_lifecycle::PostStatus::parse(status)?;
    }

    let post = PostRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    Ok(Json(post))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PostRepo::delete(&state.pool, auth.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Post", id }))
    }
}

/// POST /api/v1/posts/{id}/schedule
///
/// Idempotent: allowed from any prior state; the latest call's time wins.
pub async fn schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ScheduleRequest>,
) -> AppResult<Json<Post>> {
    let post = PostRepo::schedule(&state.pool, auth.user_id, id, input.scheduled_at)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    Ok(Json(post))
}

/// POST /api/v1/posts/{id}/retry
///
/// Reset a failed post to `scheduled` for another publish attempt. Only
/// failed posts under the retry cap qualify.
pub async fn retry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Post>> {
    let post = find_post(&state, auth.user_id, id).await?;

    let status = post_lifecycle::PostStatus::parse(&post.status)?;
    post_lifecycle::check_retry(status, post.retry_count)?;

    let post = PostRepo::reset_to_scheduled(&state.pool, auth.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    Ok(Json(post))
}

/// POST /api/v1/posts/{id}/publish
///
/// Share the post on the user's LinkedIn feed and mark it published. A
/// provider failure records the attempt (status `failed`, retry counter
/// bumped) before the error is returned.
pub async fn publish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Post>> {
    let post = find_post(&state, auth.user_id, id).await?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let Some(config) = state.config.linkedin.clone() else {
        return Err(AppError::Core(CoreError::auth_misconfigured(
            "LinkedIn integration is not configured",
        )));
    };
    let client = LinkedInClient::new(config);

    let token = linkedin::access_token_for(&state.pool, &client, &state.encryption_key, &user)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "LinkedIn account is not connected".into(),
            ))
        })?;
    let member_id = user.linkedin_member_id.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "LinkedIn account is not connected".into(),
        ))
    })?;

    match client.share_post(&token, member_id, &post.content).await {
        Ok(()) => {
            let post = PostRepo::mark_published(&state.pool, auth.user_id, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
            tracing::info!(post_id = id, "Post published");
            Ok(Json(post))
        }
        Err(e) => {
            tracing::warn!(post_id = id, error = %e, "Publish attempt failed");
            PostRepo::mark_publish_failed(&state.pool, auth.user_id, id).await?;
            Err(AppError::Core(e))
        }
    }
}

/// POST /api/v1/posts/generate
///
/// Drafts post content from an idea. Provider errors surface to the caller;
/// with no provider configured the deterministic template is used instead.
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<GenerateContentRequest>,
) -> AppResult<Json<GeneratedContentResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    let idea = PostIdeaRepo::find(&state.pool, auth.user_id, input.post_idea_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PostIdea",
            id: input.post_idea_id,
        }))?;

    let tone = input.tone.as_deref().unwrap_or("professional");
    let max_words = input.max_words.unwrap_or(300);
    let content = match &state.generator {
        Some(generator) => {
            let request = PostRequest {
                topic: &idea.title,
                description: &idea.description,
                skills: &user.skills,
                tone,
                max_words,
            };
            generator.generate_post(&request).await?
        }
        None => fallback_post_content(&idea.title, &user.skills),
    };

    Ok(Json(GeneratedContentResponse { content }))
}

/// GET /api/v1/posts/stats/weekly-count
///
/// Posts counted against this week's quota: created since Monday with
/// status `scheduled` or `published`.
pub async fn weekly_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<WeeklyCountResponse>> {
    let week_start = user_week_start(&state, auth.user_id).await?;
    let count = PostRepo::count_since(&state.pool, auth.user_id, week_start).await?;
    Ok(Json(WeeklyCountResponse { count, week_start }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_post(state: &AppState, user_id: DbId, id: DbId) -> Result<Post, AppError> {
    PostRepo::find(&state.pool, user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))
}

/// Monday 00:00 of the current week in the user's timezone, as UTC.
pub(crate) async fn user_week_start(
    state: &AppState,
    user_id: DbId,
) -> Result<Timestamp, AppError> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    let tz = time_window::parse_timezone(&user.timezone).ok();
    Ok(time_window::start_of_week(Utc::now(), tz))
}
