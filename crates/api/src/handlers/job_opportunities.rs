//! Handlers for the `/job-opportunities` resource: CRUD plus the stage
//! transition endpoint with its append-only audit history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use jobtrail_core::error::CoreError;
use jobtrail_core::job_stage::{JobStage, StageHistoryEntry};
use jobtrail_core::types::DbId;
use jobtrail_core::validation;
use jobtrail_db::models::job_opportunity::{
    CreateJobOpportunity, JobOpportunity, UpdateJobOpportunity,
};
use jobtrail_db::repositories::JobOpportunityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Optional list filter for `GET /job-opportunities`.
#[derive(Debug, Default, Deserialize)]
pub struct StageFilter {
    pub stage: Option<String>,
}

/// Request body for `PUT /job-opportunities/{id}/stage`.
#[derive(Debug, Deserialize)]
pub struct UpdateStageRequest {
    pub stage: String,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/job-opportunities
///
/// New opportunities always start in `initial_contacts` with a seed history
/// entry.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateJobOpportunity>,
) -> AppResult<(StatusCode, Json<JobOpportunity>)> {
    validation::validate_length(&input.company, "company", 1, 200)?;
    validation::validate_length(&input.position, "position", 1, 200)?;
    if let Some(url) = input.job_posting_url.as_deref() {
        validation::validate_url(url, "job_posting_url")?;
    }
    if let Some(url) = input.company_website.as_deref() {
        validation::validate_url(url, "company_website")?;
    }

    let opportunity = JobOpportunityRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(opportunity)))
}

/// GET /api/v1/job-opportunities
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<StageFilter>,
) -> AppResult<Json<Vec<JobOpportunity>>> {
    if let Some(stage) = &filter.stage {
        JobStage::parse(stage)?;
    }
    let opportunities =
        JobOpportunityRepo::list(&state.pool, auth.user_id, filter.stage.as_deref()).await?;
    Ok(Json(opportunities))
}

/// GET /api/v1/job-opportunities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<JobOpportunity>> {
    let opportunity = find_opportunity(&state, auth.user_id, id).await?;
    Ok(Json(opportunity))
}

/// PUT /api/v1/job-opportunities/{id}
///
/// Patches descriptive fields only; the stage moves through the dedicated
/// transition endpoint.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateJobOpportunity>,
) -> AppResult<Json<JobOpportunity>> {
    if let Some(company) = &input.company {
        validation::validate_length(company, "company", 1, 200)?;
    }
    if let Some(position) = &input.position {
        validation::validate_length(position, "position", 1, 200)?;
    }
    if let Some(url) = input.job_posting_url.as_deref() {
        validation::validate_url(url, "job_posting_url")?;
    }
    if let Some(url) = input.company_website.as_deref() {
        validation::validate_url(url, "company_website")?;
    }

    let opportunity = JobOpportunityRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "JobOpportunity",
            id,
        }))?;
    Ok(Json(opportunity))
}

/// DELETE /api/v1/job-opportunities/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = JobOpportunityRepo::delete(&state.pool, auth.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "JobOpportunity",
            id,
        }))
    }
}

/// PUT /api/v1/job-opportunities/{id}/stage
///
/// Move to any stage; the transition and its notes are appended to the
/// audit history atomically. Jumps outside the standard forward flow are
/// accepted but flagged in the logs.
pub async fn update_stage(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStageRequest>,
) -> AppResult<Json<JobOpportunity>> {
    let new_stage = JobStage::parse(&input.stage)?;
    if let Some(notes) = &input.notes {
        validation::validate_length(notes, "notes", 0, 1000)?;
    }

    let current = find_opportunity(&state, auth.user_id, id).await?;
    let current_stage = JobStage::parse(&current.stage)?;

    if !current_stage.is_standard_transition(new_stage) {
        tracing::warn!(
            opportunity_id = id,
            from = current.stage,
            to = input.stage,
            "Non-standard stage transition"
        );
    }

    let entry = StageHistoryEntry::new(new_stage, Utc::now(), input.notes);
    let opportunity = JobOpportunityRepo::update_stage(&state.pool, auth.user_id, id, &entry)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "JobOpportunity",
            id,
        }))?;
    Ok(Json(opportunity))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_opportunity(
    state: &AppState,
    user_id: DbId,
    id: DbId,
) -> Result<JobOpportunity, AppError> {
    JobOpportunityRepo::find(&state.pool, user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "JobOpportunity",
            id,
        }))
}
