//! Handlers for the `/post-ideas` resource: CRUD plus idea generation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use jobtrail_core::error::CoreError;
use jobtrail_core::generation::{fallback_post_ideas, PostIdeaDraft};
use jobtrail_core::types::DbId;
use jobtrail_core::{idea_status, validation};
use jobtrail_db::models::post_idea::{CreatePostIdea, PostIdea, PostIdeaFilter, UpdatePostIdea};
use jobtrail_db::repositories::{PostIdeaRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// How many ideas a single generate call produces by default.
const DEFAULT_IDEA_COUNT: u32 = 5;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /post-ideas/generate`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub count: Option<u32>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/post-ideas
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreatePostIdea>,
) -> AppResult<(StatusCode, Json<PostIdea>)> {
    validate_idea(&input.title, &input.description, &input.tags)?;

    let idea = PostIdeaRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(idea)))
}

/// GET /api/v1/post-ideas
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<PostIdeaFilter>,
) -> AppResult<Json<Vec<PostIdea>>> {
    let ideas = PostIdeaRepo::list(&state.pool, auth.user_id, &filter).await?;
    Ok(Json(ideas))
}

/// GET /api/v1/post-ideas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<PostIdea>> {
    let idea = PostIdeaRepo::find(&state.pool, auth.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PostIdea",
            id,
        }))?;
    Ok(Json(idea))
}

/// PUT /api/v1/post-ideas/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePostIdea>,
) -> AppResult<Json<PostIdea>> {
    if let Some(title) = &input.title {
        validation::validate_length(title, "title", 1, 200)?;
    }
    if let Some(description) = &input.description {
        validation::validate_length(description, "description", 0, 2000)?;
    }
    if let Some(tags) = &input.tags {
        idea_status::validate_tags(tags)?;
    }
    if let Some(status) = &input.status {
        idea_status::IdeaStatus::parse(status)?;
    }

    let idea = PostIdeaRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PostIdea",
            id,
        }))?;
    Ok(Json(idea))
}

/// DELETE /api/v1/post-ideas/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PostIdeaRepo::delete(&state.pool, auth.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "PostIdea",
            id,
        }))
    }
}

/// POST /api/v1/post-ideas/generate
///
/// Generate idea suggestions tailored to the user's skills and persist them
/// as active ideas. This path never surfaces a provider failure: with no
/// generator configured, or when the provider errors, the deterministic
/// templates are used instead.
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<GenerateRequest>,
) -> AppResult<(StatusCode, Json<Vec<PostIdea>>)> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let count = input.count.unwrap_or(DEFAULT_IDEA_COUNT).clamp(1, 10);

    let drafts: Vec<PostIdeaDraft> = match &state.generator {
        Some(generator) => match generator.generate_ideas(&user.skills, count).await {
            Ok(drafts) => drafts,
            Err(e) => {
                tracing::warn!(error = %e, "Idea generation failed, using fallback templates");
                fallback_post_ideas(&user.skills)
            }
        },
        None => fallback_post_ideas(&user.skills),
    };

    let mut ideas = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let idea = PostIdeaRepo::create(
            &state.pool,
            auth.user_id,
            &CreatePostIdea {
                title: draft.title,
                description: draft.description,
                tags: vec!["generated".to_string()],
            },
        )
        .await?;
        ideas.push(idea);
    }

    Ok((StatusCode::CREATED, Json(ideas)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_idea(title: &str, description: &str, tags: &[String]) -> Result<(), CoreError> {
    validation::validate_length(title, "title", 1, 200)?;
    validation::validate_length(description, "description", 0, 2000)?;
    idea_status::validate_tags(tags)
}
