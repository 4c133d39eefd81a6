//! Route definitions for the `/job-opportunities` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::job_opportunities;
use crate::state::AppState;

/// Routes mounted at `/job-opportunities`.
///
/// ```text
/// GET    /             -> list (?stage)
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// PUT    /{id}/stage   -> update_stage
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(job_opportunities::list).post(job_opportunities::create),
        )
        .route(
            "/{id}",
            get(job_opportunities::get_by_id)
                .put(job_opportunities::update)
                .delete(job_opportunities::delete),
        )
        .route("/{id}/stage", put(job_opportunities::update_stage))
}
