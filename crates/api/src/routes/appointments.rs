//! Route definitions for the `/appointments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Routes mounted at `/appointments`.
///
/// ```text
/// GET    /      -> list (?kind, ?start_date, ?end_date)
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(appointments::list).post(appointments::create))
        .route(
            "/{id}",
            get(appointments::get_by_id)
                .put(appointments::update)
                .delete(appointments::delete),
        )
}
