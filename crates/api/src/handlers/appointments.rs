//! Handlers for the `/appointments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use jobtrail_core::error::CoreError;
use jobtrail_core::types::DbId;
use jobtrail_core::validation;
use jobtrail_db::models::appointment::{
    Appointment, AppointmentFilter, CreateAppointment, UpdateAppointment,
};
use jobtrail_db::repositories::AppointmentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const APPOINTMENT_KINDS: &[&str] = &["interview", "study_session"];

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/appointments
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateAppointment>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    validation::validate_length(&input.title, "title", 1, 200)?;
    validate_kind(&input.kind)?;
    validation::validate_time_range(input.start_time, input.end_time)?;

    let appointment = AppointmentRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// GET /api/v1/appointments
///
/// Sorted by start time ascending; supports `kind` and start-time range
/// filters.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<AppointmentFilter>,
) -> AppResult<Json<Vec<Appointment>>> {
    if let Some(kind) = &filter.kind {
        validate_kind(kind)?;
    }
    let appointments = AppointmentRepo::list(&state.pool, auth.user_id, &filter).await?;
    Ok(Json(appointments))
}

/// GET /api/v1/appointments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Appointment>> {
    let appointment = find_appointment(&state, auth.user_id, id).await?;
    Ok(Json(appointment))
}

/// PUT /api/v1/appointments/{id}
///
/// The time-range check runs against the effective values after the patch,
/// so moving only one endpoint cannot invert the range.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAppointment>,
) -> AppResult<Json<Appointment>> {
    if let Some(title) = &input.title {
        validation::validate_length(title, "title", 1, 200)?;
    }
    if input.start_time.is_some() || input.end_time.is_some() {
        let current = find_appointment(&state, auth.user_id, id).await?;
        let start = input.start_time.unwrap_or(current.start_time);
        let end = input.end_time.unwrap_or(current.end_time);
        validation::validate_time_range(start, end)?;
    }

    let appointment = AppointmentRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Appointment",
            id,
        }))?;
    Ok(Json(appointment))
}

/// DELETE /api/v1/appointments/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AppointmentRepo::delete(&state.pool, auth.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Appointment",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_kind(kind: &str) -> Result<(), CoreError> {
    if APPOINTMENT_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown appointment kind: {kind}"
        )))
    }
}

async fn find_appointment(
    state: &AppState,
    user_id: DbId,
    id: DbId,
) -> Result<Appointment, AppError> {
    AppointmentRepo::find(&state.pool, user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Appointment",
            id,
        }))
}
