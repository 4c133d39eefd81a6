//! Route definitions for the `/recruiters` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::recruiters;
use crate::state::AppState;

/// Routes mounted at `/recruiters`.
///
/// The stats and search routes are registered before `/{id}` so neither
/// segment is ever parsed as an id.
///
/// ```text
/// GET    /                        -> list (?status)
/// POST   /                        -> create
/// GET    /stats/weekly-count      -> weekly_count
/// GET    /search/linkedin-urls    -> search_linkedin_urls
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// PUT    /{id}/status             -> update_status
/// POST   /{id}/generate-messages  -> generate_messages
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recruiters::list).post(recruiters::create))
        .route("/stats/weekly-count", get(recruiters::weekly_count))
        .route(
            "/search/linkedin-urls",
            get(recruiters::search_linkedin_urls),
        )
        .route(
            "/{id}",
            get(recruiters::get_by_id)
                .put(recruiters::update)
                .delete(recruiters::delete),
        )
        .route("/{id}/status", put(recruiters::update_status))
        .route(
            "/{id}/generate-messages",
            post(recruiters::generate_messages),
        )
}
