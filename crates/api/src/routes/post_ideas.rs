//! Route definitions for the `/post-ideas` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::post_ideas;
use crate::state::AppState;

/// Routes mounted at `/post-ideas`.
///
/// ```text
/// GET    /          -> list (?status, ?tag)
/// POST   /          -> create
/// POST   /generate  -> generate
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(post_ideas::list).post(post_ideas::create))
        .route("/generate", post(post_ideas::generate))
        .route(
            "/{id}",
            get(post_ideas::get_by_id)
                .put(post_ideas::update)
                .delete(post_ideas::delete),
        )
}
