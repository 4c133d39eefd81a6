//! Route definitions for the `/posts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// The generate and stats routes are registered before `/{id}` so their
/// segments are never parsed as ids.
///
/// ```text
/// GET    /                    -> list (?status)
/// POST   /                    -> create
/// POST   /generate            -> generate (content from an idea)
/// GET    /stats/weekly-count  -> weekly_count
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// POST   /{id}/schedule       -> schedule
/// POST   /{id}/retry          -> retry
/// POST   /{id}/publish        -> publish
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list).post(posts::create))
        .route("/generate", post(posts::generate))
        .route("/stats/weekly-count", get(posts::weekly_count))
        .route(
            "/{id}",
            get(posts::get_by_id)
                .put(posts::update)
                .delete(posts::delete),
        )
        .route("/{id}/schedule", post(posts::schedule))
        .route("/{id}/retry", post(posts::retry))
        .route("/{id}/publish", post(posts::publish))
}
